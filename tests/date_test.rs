use chrono::{TimeZone, Utc};
use email_archive::parse_header_date;

#[test]
fn test_gmail_format() {
    assert_eq!(
        parse_header_date("Mon, Dec 9, 2024 at 10:30 AM"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 10, 30, 0).unwrap())
    );
}

#[test]
fn test_wrong_weekday_is_dropped() {
    assert_eq!(
        parse_header_date("Fri, Dec 9, 2024 at 10:30 AM"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 10, 30, 0).unwrap())
    );
}

#[test]
fn test_outlook_format() {
    assert_eq!(
        parse_header_date("Monday, December 9, 2024 3:05 PM"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 15, 5, 0).unwrap())
    );
}

#[test]
fn test_rfc2822() {
    assert_eq!(
        parse_header_date("Mon, 9 Dec 2024 10:30:00 +0100"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 9, 30, 0).unwrap())
    );
}

#[test]
fn test_iso_like() {
    assert_eq!(
        parse_header_date("2024-12-09 10:30:15"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 10, 30, 15).unwrap())
    );
}

#[test]
fn test_date_only() {
    assert_eq!(
        parse_header_date("December 9, 2024"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_zone_name_ignored() {
    assert_eq!(
        parse_header_date("Dec 9, 2024, 10:30 AM EST"),
        Some(Utc.with_ymd_and_hms(2024, 12, 9, 10, 30, 0).unwrap())
    );
}

#[test]
fn test_unrecognized() {
    assert_eq!(parse_header_date(""), None);
    assert_eq!(parse_header_date("yesterday afternoon"), None);
    assert_eq!(parse_header_date("Mon"), None);
}
