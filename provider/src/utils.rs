//! Utility date equations for the proleptic Gregorian ("ISO") calendar.
//!
//! These operate on whole days/seconds relative to the Unix epoch.

/// Cumulative days before each month in a common year.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
/// Cumulative days before each month in a leap year.
const DAYS_BEFORE_MONTH_LEAP: [i64; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the epoch day number of January 1st of the given year.
pub(crate) fn epoch_days_for_year(year: i32) -> i64 {
    let y = i64::from(year);
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Returns the epoch day number for a Gregorian date.
///
/// `month` is 1-based; `day` is the day of the month.
pub(crate) fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let before = if is_leap_year(year) {
        DAYS_BEFORE_MONTH_LEAP
    } else {
        DAYS_BEFORE_MONTH
    };
    epoch_days_for_year(year) + before[(month - 1) as usize] + i64::from(day) - 1
}

/// Returns the Gregorian (year, month, day) for an epoch day number.
pub(crate) fn gregorian_date_from_epoch_days(days: i64) -> (i32, u8, u8) {
    // Roughly calculate the year for the day count, then refine in both
    // directions; the estimate can be off by one far from the epoch.
    let mut year = (days / 365) as i32 + 1970;
    while epoch_days_for_year(year) > days {
        year -= 1;
    }
    while epoch_days_for_year(year + 1) <= days {
        year += 1;
    }

    let day_of_year = days - epoch_days_for_year(year);
    let before = if is_leap_year(year) {
        DAYS_BEFORE_MONTH_LEAP
    } else {
        DAYS_BEFORE_MONTH
    };
    let month_index = match before.binary_search(&day_of_year) {
        Ok(i) => i,
        Err(i) => i - 1,
    };
    let day = day_of_year - before[month_index] + 1;
    (year, month_index as u8 + 1, day as u8)
}

/// `ISODaysInMonth`, with a 1-based month.
pub(crate) fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + is_leap_year(year) as u8,
        _ => unreachable!("days_in_month called with an out-of-range month"),
    }
}
