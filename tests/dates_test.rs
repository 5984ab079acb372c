use chrono::{NaiveDate, TimeZone, Utc};
use mbox_stats::{DateRange, StoredMessage, resolve_timestamp};

fn message_with(dates: &[&str], envelope: &str) -> StoredMessage {
    StoredMessage {
        date_headers: dates.iter().map(ToString::to_string).collect(),
        envelope: envelope.to_string(),
        ..StoredMessage::default()
    }
}

#[test]
fn test_header_date_wins() {
    let message = message_with(
        &["Mon, 01 Jan 2024 10:00:00 +0000"],
        "From x@example.com Tue Feb 06 12:00:00 +0000 2024",
    );
    let ts = resolve_timestamp(&message).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
}

#[test]
fn test_nested_part_date_fallback() {
    let message = message_with(
        &["not a date at all", "Tue, 02 Jan 2024 12:00:00 +0100"],
        "",
    );
    let ts = resolve_timestamp(&message).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap());
}

#[test]
fn test_envelope_fallback() {
    let message = message_with(&[], "From reporter@example.com Mon Jan 01 10:00:00 +0000 2024");
    let ts = resolve_timestamp(&message).unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
}

#[test]
fn test_unresolvable_is_none() {
    let message = message_with(&["garbage"], "From reporter@example.com");
    assert!(resolve_timestamp(&message).is_none());
}

#[test]
fn test_range_inclusive_bounds() {
    let range = DateRange::from_dates(
        Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
    );
    assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap()));
    assert!(!range.contains(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
    assert!(!range.contains(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()));
}

#[test]
fn test_range_end_of_day_boundary() {
    let range =
        DateRange::from_dates(None, Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    let end_of_day = Utc
        .with_ymd_and_hms(2024, 1, 2, 23, 59, 59)
        .unwrap()
        .checked_add_signed(chrono::Duration::microseconds(999_999))
        .unwrap();
    assert!(range.contains(end_of_day));
    let one_later = end_of_day + chrono::Duration::microseconds(1);
    assert!(!range.contains(one_later));
}

#[test]
fn test_open_sided_ranges() {
    let start_only =
        DateRange::from_dates(Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()), None);
    assert!(start_only.contains(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
    assert!(!start_only.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));

    let end_only =
        DateRange::from_dates(None, Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    assert!(end_only.contains(Utc.with_ymd_and_hms(1990, 6, 15, 0, 0, 0).unwrap()));
    assert!(!end_only.contains(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()));

    let unbounded = DateRange::default();
    assert!(!unbounded.is_bounded());
    assert!(unbounded.contains(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
}
