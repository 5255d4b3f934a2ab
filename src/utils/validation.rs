// ============================================================================
// VALIDATION - Input checks that run before any request is issued
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::{MAX_ACADEMIC_YEAR, MIN_ACADEMIC_YEAR};

lazy_static! {
    /// Indian mobile numbers: 10 ASCII digits, leading 6-9.
    static ref MOBILE_RE: Regex = Regex::new(r"^[6-9][0-9]{9}$").unwrap();
    /// Date of birth as typed on the parent login form. `\d` would also
    /// accept Devanagari and other Unicode digits.
    static ref DOB_RE: Regex = Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").unwrap();
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile)
}

/// `DD-MM-YYYY` shape only; the backend owns the calendar check.
pub fn is_valid_dob(dob: &str) -> bool {
    DOB_RE.is_match(dob)
}

pub fn is_valid_academic_year(year: i32) -> bool {
    (MIN_ACADEMIC_YEAR..=MAX_ACADEMIC_YEAR).contains(&year)
}

/// Parse a stored or user-typed year, keeping only in-range values.
pub fn parse_academic_year(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|year| is_valid_academic_year(*year))
}
