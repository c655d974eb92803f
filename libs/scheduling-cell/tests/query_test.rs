mod common;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use scheduling_cell::models::{Appointment, AppointmentStatus, ImageRef};
use scheduling_cell::services::queries::QueryService;
use scheduling_cell::store::AppointmentStore;

use common::{clinic_with_one_doctor, TestBackends};

async fn seed(
    backends: &TestBackends,
    patient_id: Uuid,
    doctor_id: Uuid,
    scheduled_at: DateTime<Utc>,
    reason: Option<&str>,
    image_ref: Option<ImageRef>,
) -> Uuid {
    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        patient_id,
        doctor_id,
        scheduled_at,
        reason: reason.map(str::to_string),
        image_ref,
        status: AppointmentStatus::Scheduled,
        created_at: now,
        updated_at: now,
    };
    backends.store.create(appointment).await.unwrap().id
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[tokio::test]
async fn patient_listing_carries_the_doctor_name() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    seed(
        &backends,
        patient_id,
        doctor_id,
        at(2027, 3, 7, 10, 30),
        Some("Follow-up"),
        None,
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_patient(patient_id).await.unwrap();

    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.doctor_name.as_deref(), Some("Dr. Sara Haddad"));
    assert_eq!(view.patient_name, None);
    assert_eq!(view.date_time, "2027-03-07 10:30");
    assert_eq!(view.status, AppointmentStatus::Scheduled);
    assert_eq!(view.reason, "Follow-up");
    assert_eq!(view.image_url, None);
}

#[tokio::test]
async fn doctor_listing_carries_the_patient_name() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    seed(
        &backends,
        patient_id,
        doctor_id,
        at(2027, 3, 8, 11, 0),
        None,
        None,
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_doctor(doctor_id).await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].patient_name.as_deref(), Some("Omar Khalil"));
    assert_eq!(views[0].doctor_name, None);
}

#[tokio::test]
async fn dangling_doctor_reference_renders_as_unknown() {
    let (backends, _doctor_id, patient_id) = clinic_with_one_doctor().await;
    seed(
        &backends,
        patient_id,
        Uuid::new_v4(),
        at(2027, 3, 9, 12, 0),
        None,
        None,
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_patient(patient_id).await.unwrap();

    assert_eq!(views[0].doctor_name.as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn dangling_patient_reference_renders_as_unknown() {
    let (backends, doctor_id, _patient_id) = clinic_with_one_doctor().await;
    seed(
        &backends,
        Uuid::new_v4(),
        doctor_id,
        at(2027, 3, 10, 12, 30),
        None,
        None,
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_doctor(doctor_id).await.unwrap();

    assert_eq!(views[0].patient_name.as_deref(), Some("Unknown"));
}

#[tokio::test]
async fn missing_reason_renders_as_a_dash() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    seed(
        &backends,
        patient_id,
        doctor_id,
        at(2027, 3, 11, 13, 0),
        None,
        None,
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_patient(patient_id).await.unwrap();

    assert_eq!(views[0].reason, "-");
}

#[tokio::test]
async fn listings_ascend_by_scheduled_time() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    // Insert out of order.
    seed(&backends, patient_id, doctor_id, at(2027, 3, 14, 15, 0), None, None).await;
    seed(&backends, patient_id, doctor_id, at(2027, 3, 12, 10, 0), None, None).await;
    seed(&backends, patient_id, doctor_id, at(2027, 3, 13, 11, 30), None, None).await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_patient(patient_id).await.unwrap();

    let times: Vec<&str> = views.iter().map(|v| v.date_time.as_str()).collect();
    assert_eq!(
        times,
        vec!["2027-03-12 10:00", "2027-03-13 11:30", "2027-03-14 15:00"]
    );
}

#[tokio::test]
async fn listings_only_include_the_callers_appointments() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    let other_patient = Uuid::new_v4();
    backends.directory.add_patient(other_patient, "Lina Aziz").await;

    seed(&backends, patient_id, doctor_id, at(2027, 3, 15, 10, 0), None, None).await;
    seed(&backends, other_patient, doctor_id, at(2027, 3, 15, 10, 30), None, None).await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());

    let mine = service.list_for_patient(patient_id).await.unwrap();
    assert_eq!(mine.len(), 1);

    let doctors = service.list_for_doctor(doctor_id).await.unwrap();
    assert_eq!(doctors.len(), 2);
}

#[tokio::test]
async fn image_snapshot_surfaces_in_the_view() {
    let (backends, doctor_id, patient_id) = clinic_with_one_doctor().await;
    let image = ImageRef {
        id: Uuid::new_v4(),
        url: "http://localhost/uploads/scan.png".to_string(),
    };
    seed(
        &backends,
        patient_id,
        doctor_id,
        at(2027, 3, 16, 10, 0),
        Some("X-ray review"),
        Some(image),
    )
    .await;

    let service = QueryService::new(backends.store.clone(), backends.directory.clone());
    let views = service.list_for_patient(patient_id).await.unwrap();

    assert_eq!(
        views[0].image_url.as_deref(),
        Some("http://localhost/uploads/scan.png")
    );
}
