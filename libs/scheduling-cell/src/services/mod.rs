pub mod availability;
pub mod booking;
pub mod cancellation;
pub mod locks;
pub mod queries;
pub mod slots;
