use assert_matches::assert_matches;
use chrono::{DateTime, Duration, TimeZone, Utc};

use scheduling_cell::models::SlotError;
use scheduling_cell::services::slots::validate_slot;

/// Fixed reference clock so calendar-sensitive cases stay deterministic.
/// 2025-01-01 is a Wednesday.
fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
}

fn slot(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn accepts_a_valid_sunday_morning_slot() {
    // 2025-01-05 is a Sunday.
    assert_eq!(validate_slot(slot(2025, 1, 5, 10, 0), reference_now()), Ok(()));
}

#[test]
fn accepts_both_bounds_of_the_working_day() {
    assert_eq!(validate_slot(slot(2025, 1, 5, 10, 0), reference_now()), Ok(()));
    assert_eq!(validate_slot(slot(2025, 1, 5, 16, 0), reference_now()), Ok(()));
}

#[test]
fn rejects_past_and_present_timestamps() {
    let now = reference_now();
    assert_matches!(validate_slot(now - Duration::hours(1), now), Err(SlotError::InThePast));
    // Equal-to-now is rejected too.
    assert_matches!(validate_slot(now, now), Err(SlotError::InThePast));
}

#[test]
fn rejects_every_time_outside_working_hours() {
    // Every half-hour slot of a working day outside [10:00, 16:00].
    for hour in 0..24u32 {
        for minute in [0u32, 30] {
            let minutes_of_day = hour * 60 + minute;
            if (600..=960).contains(&minutes_of_day) {
                continue;
            }
            assert_matches!(
                validate_slot(slot(2025, 1, 5, hour, minute), reference_now()),
                Err(SlotError::OutsideWorkingHours),
                "expected {:02}:{:02} to be outside working hours",
                hour,
                minute
            );
        }
    }
}

#[test]
fn rejects_sixteen_thirty_as_outside_working_hours() {
    assert_matches!(
        validate_slot(slot(2025, 1, 5, 16, 30), reference_now()),
        Err(SlotError::OutsideWorkingHours)
    );
}

#[test]
fn rejects_fridays_and_saturdays_at_any_time_of_day() {
    // 2025-01-03 is a Friday, 2025-01-04 a Saturday.
    for day in [3u32, 4] {
        for hour in [10u32, 12, 16] {
            assert_matches!(
                validate_slot(slot(2025, 1, day, hour, 0), reference_now()),
                Err(SlotError::NotAWorkingDay)
            );
        }
    }
}

#[test]
fn working_hours_take_precedence_over_working_day() {
    // A Friday at 08:00 fails the hours rule before the weekday rule.
    assert_matches!(
        validate_slot(slot(2025, 1, 3, 8, 0), reference_now()),
        Err(SlotError::OutsideWorkingHours)
    );
}

#[test]
fn rejects_minutes_off_the_half_hour_grid() {
    for minute in [1u32, 10, 15, 29, 31, 45, 59] {
        assert_matches!(
            validate_slot(slot(2025, 1, 5, 10, minute), reference_now()),
            Err(SlotError::InvalidMinuteGranularity),
            "expected minute {} to be rejected",
            minute
        );
    }
}

#[test]
fn seconds_are_ignored_by_the_minute_rule() {
    let ts = Utc.with_ymd_and_hms(2025, 1, 5, 10, 30, 45).unwrap();
    assert_eq!(validate_slot(ts, reference_now()), Ok(()));
}

#[test]
fn accepts_every_working_day_of_the_week() {
    // 2025-01-05 (Sun) through 2025-01-09 (Thu).
    for day in 5u32..=9 {
        assert_eq!(
            validate_slot(slot(2025, 1, day, 12, 30), reference_now()),
            Ok(()),
            "expected 2025-01-{:02} to be a working day",
            day
        );
    }
}
