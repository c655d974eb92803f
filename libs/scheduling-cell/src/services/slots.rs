// libs/scheduling-cell/src/services/slots.rs
//
// Slot policy: the fixed working-hours/working-days rules a timestamp must
// satisfy to be a bookable slot. Pure validation, no side effects.

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc, Weekday};

use crate::models::SlotError;

/// First bookable time of day, inclusive.
pub fn opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

/// Last bookable time of day, inclusive.
pub fn closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(16, 0, 0).unwrap()
}

/// Validate a slot against the clinic calendar, checked in order:
/// strictly future, working hours, working day, half-hour grid. The first
/// failing rule wins so callers get one precise message.
///
/// The seconds component is not validated; two timestamps differing only in
/// seconds are distinct slots as far as this policy is concerned.
pub fn validate_slot(scheduled_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), SlotError> {
    if scheduled_at <= now {
        return Err(SlotError::InThePast);
    }

    let time_of_day = scheduled_at.time();
    if time_of_day < opening_time() || time_of_day > closing_time() {
        return Err(SlotError::OutsideWorkingHours);
    }

    // The clinic works Sunday through Thursday.
    if matches!(scheduled_at.weekday(), Weekday::Fri | Weekday::Sat) {
        return Err(SlotError::NotAWorkingDay);
    }

    if scheduled_at.minute() != 0 && scheduled_at.minute() != 30 {
        return Err(SlotError::InvalidMinuteGranularity);
    }

    Ok(())
}

/// Validate a slot against the current wall clock.
pub fn is_valid_slot(scheduled_at: DateTime<Utc>) -> Result<(), SlotError> {
    validate_slot(scheduled_at, Utc::now())
}
