//! Wall-clock ("naive") datetime values.
//!
//! A [`CivilDateTime`] is a date and time with no attached offset or zone,
//! at second precision, on the proleptic Gregorian calendar. A
//! [`LocalDateTime`] pairs one with the calendar system the caller
//! expressed it in; resolution only interprets ISO values and reports
//! everything else as a calendar mismatch.

use icu_calendar::AnyCalendarKind;

use crate::epoch_seconds::SECONDS_PER_DAY;
use crate::{utils, TimeZoneProviderError};

/// A wall-clock date and time with no offset or zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl CivilDateTime {
    /// Creates a new `CivilDateTime` without any validation.
    pub(crate) const fn new_unchecked(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Creates a new validated `CivilDateTime`.
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimeZoneProviderError> {
        if !(1..=12).contains(&month) {
            return Err(TimeZoneProviderError::Range("month must be in 1..=12"));
        }
        if day == 0 || day > utils::iso_days_in_month(year, month) {
            return Err(TimeZoneProviderError::Range("day is out of range for month"));
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(TimeZoneProviderError::Range("time component out of range"));
        }
        Ok(Self::new_unchecked(year, month, day, hour, minute, second))
    }

    /// The seconds since the epoch this reading would denote if it were UTC.
    ///
    /// The value has no zone applied; providers subtract a candidate total
    /// offset from it to obtain a real instant.
    pub fn as_utc_seconds(&self) -> i64 {
        let days = utils::epoch_days_from_gregorian_date(self.year, self.month, self.day);
        days * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Converts seconds since the epoch into the wall-clock reading at UTC.
    pub fn from_epoch_seconds(seconds: i64) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let rem = seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = utils::gregorian_date_from_epoch_days(days);
        Self {
            year,
            month,
            day,
            hour: (rem / 3600) as u8,
            minute: ((rem / 60) % 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Shifts this reading by a number of seconds, rebalancing date fields.
    pub fn checked_add_seconds(&self, seconds: i64) -> Self {
        Self::from_epoch_seconds(self.as_utc_seconds() + seconds)
    }
}

/// A wall-clock datetime plus the calendar system it was expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDateTime {
    pub civil: CivilDateTime,
    pub calendar: AnyCalendarKind,
}

impl LocalDateTime {
    /// An ISO-calendar local datetime.
    pub fn new(civil: CivilDateTime) -> Self {
        Self {
            civil,
            calendar: AnyCalendarKind::Iso,
        }
    }

    pub fn with_calendar(civil: CivilDateTime, calendar: AnyCalendarKind) -> Self {
        Self { civil, calendar }
    }

    pub fn is_iso(&self) -> bool {
        self.calendar == AnyCalendarKind::Iso
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_second_round_trips() {
        let cases = [
            (0, (1970, 1, 1, 0, 0, 0)),
            (-1, (1969, 12, 31, 23, 59, 59)),
            (1_546_300_800, (2019, 1, 1, 0, 0, 0)),
            (1_582_934_400, (2020, 2, 29, 0, 0, 0)),
            (1_583_020_800, (2020, 3, 1, 0, 0, 0)),
            (1_546_333_200, (2019, 1, 1, 9, 0, 0)),
        ];
        for (seconds, (year, month, day, hour, minute, second)) in cases {
            let civil = CivilDateTime::from_epoch_seconds(seconds);
            assert_eq!(
                civil,
                CivilDateTime::new_unchecked(year, month, day, hour, minute, second)
            );
            assert_eq!(civil.as_utc_seconds(), seconds);
        }
    }

    #[test]
    fn validation() {
        assert!(CivilDateTime::try_new(2019, 2, 29, 0, 0, 0).is_err());
        assert!(CivilDateTime::try_new(2020, 2, 29, 0, 0, 0).is_ok());
        assert!(CivilDateTime::try_new(2019, 13, 1, 0, 0, 0).is_err());
        assert!(CivilDateTime::try_new(2019, 6, 15, 24, 0, 0).is_err());
        assert!(CivilDateTime::try_new(2019, 6, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn add_seconds_rebalances() {
        let civil = CivilDateTime::new_unchecked(2019, 12, 31, 23, 0, 0);
        assert_eq!(
            civil.checked_add_seconds(2 * 3600),
            CivilDateTime::new_unchecked(2020, 1, 1, 1, 0, 0)
        );
        assert_eq!(
            civil.checked_add_seconds(-24 * 3600),
            CivilDateTime::new_unchecked(2019, 12, 30, 23, 0, 0)
        );
    }
}
