//! Age derivation from birthdate strings

use chrono::{Datelike, Local, NaiveDate};

/// Birthdate format used throughout the snapshot data.
pub const BIRTHDATE_FORMAT: &str = "%m/%d/%Y";

/// Age below which a resident classifies as a child.
pub const ADULT_AGE: i32 = 18;

/// Derive an age in whole years from a `MM/DD/YYYY` birthdate.
///
/// A malformed birthdate yields `-1` instead of an error: historical bad
/// data must not fail a read query. The sentinel classifies as a minor.
pub fn age_from_birthdate(birthdate: &str) -> i32 {
    match NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT) {
        Ok(birth) => age_on(birth, Local::now().date_naive()),
        Err(_) => -1,
    }
}

/// Calendar-year difference, decremented when the birthday has not yet
/// occurred this year.
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if today.ordinal() < birth.ordinal() {
        age -= 1;
    }
    age
}

/// Whether an age falls below the adult threshold.
pub fn is_minor(age: i32, adult_age: i32) -> bool {
    age < adult_age
}
