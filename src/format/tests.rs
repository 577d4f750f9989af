#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_format_date_basic() {
    assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
}

#[test]
fn test_format_date_strips_leading_zero_day() {
    assert_eq!(format_date("2001-01-01").unwrap(), "1 Jan. 01");
    assert_eq!(format_date("2003-03-03").unwrap(), "3 Mar. 03");
}

#[test]
fn test_format_date_two_digit_year() {
    assert_eq!(format_date("2022-12-25").unwrap(), "25 Déc. 22");
    assert_eq!(format_date("2005-08-15").unwrap(), "15 Aoû. 05");
}

#[test]
fn test_format_date_all_months_have_abbreviations() {
    for month in 1..=12 {
        let raw = format!("2020-{month:02}-10");
        let out = format_date(&raw).unwrap();
        assert!(out.starts_with("10 "), "unexpected output: {out}");
        assert!(out.ends_with(". 20"), "unexpected output: {out}");
    }
}

#[test]
fn test_format_date_tolerates_surrounding_whitespace() {
    assert_eq!(format_date(" 2004-04-04 ").unwrap(), "4 Avr. 04");
}

#[test]
fn test_format_date_rejects_malformed() {
    assert_eq!(format_date(""), Err(FormatError::InvalidDate("".into())));
    assert!(format_date("070").is_err());
    assert!(format_date("04/04/2004").is_err());
    assert!(format_date("not a date").is_err());
}

#[test]
fn test_format_date_rejects_impossible_dates() {
    assert!(format_date("2004-13-01").is_err());
    assert!(format_date("2004-02-30").is_err());
    assert!(format_date("2004-00-10").is_err());
}

#[test]
fn test_format_date_error_carries_input() {
    let err = format_date("garbage").unwrap_err();
    assert_eq!(err.to_string(), "invalid date: 'garbage'");
}
