use crate::TimeZoneProviderError;

/// Seconds per day constant: 86,400
pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Max instant second constant
pub(crate) const MAX_INSTANT: i64 = SECONDS_PER_DAY * 100_000_000;
/// Min instant second constant
pub(crate) const MIN_INSTANT: i64 = -MAX_INSTANT;

/// A UTC instant as whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EpochSeconds(pub i64);

impl From<i64> for EpochSeconds {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl EpochSeconds {
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn check_validity(&self) -> Result<(), TimeZoneProviderError> {
        if !is_valid_epoch_seconds(self.0) {
            return Err(TimeZoneProviderError::InstantOutOfRange);
        }
        Ok(())
    }
}

/// Utility for determining if the seconds are within a valid range.
#[inline]
#[must_use]
pub fn is_valid_epoch_seconds(seconds: i64) -> bool {
    (MIN_INSTANT..=MAX_INSTANT).contains(&seconds)
}
