//! Age law used by rental eligibility.

use chrono::{Datelike, NaiveDate};

use crate::constants::MIN_RENTAL_AGE;

/// Age in whole years on `today`.
///
/// A birthday that has not yet occurred in `today`'s year counts one year
/// less. A Feb 29 birthday is reached on Mar 1 in common years. A birth date
/// after `today` gives a negative age.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth_date.year();

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}

/// Whether someone born on `birth_date` is below [`MIN_RENTAL_AGE`] on `today`.
pub fn is_under_age(birth_date: NaiveDate, today: NaiveDate) -> bool {
    age_on(birth_date, today) < MIN_RENTAL_AGE
}
