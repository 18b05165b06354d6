//! Time zone offset sourcing for the `tz_anchor` crate.
//!
//! This crate defines the vocabulary a time zone data source speaks:
//! wall-clock values ([`CivilDateTime`], [`LocalDateTime`]), UTC instants
//! ([`EpochSeconds`]), offset data ([`OffsetInfo`]) and the
//! [`TimeZoneOffsetProvider`] trait that maps between them. It also ships
//! [`FixedRuleProvider`], a transition-table backed provider usable both
//! in tests and by callers that load their own zone tables.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

mod civil;
mod epoch_seconds;
mod fixed;
pub mod provider;
pub(crate) mod utils;

use core::fmt;

pub use civil::{CivilDateTime, LocalDateTime};
pub use epoch_seconds::{is_valid_epoch_seconds, EpochSeconds, SECONDS_PER_DAY};
pub use fixed::{FixedRuleProvider, ZoneRules};
pub use provider::{
    InstantAndOffset, LocalMapping, NeverProvider, OffsetInfo, TimeZoneOffsetProvider,
    UtcOffsetSeconds,
};

/// `TimeZoneProviderError` exists as an error intended primarily for
/// provider implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneProviderError {
    /// The requested zone identifier is not known to the provider.
    ZoneNotFound,
    /// An instant fell outside the supported range.
    InstantOutOfRange,
    /// A value was out of range.
    Range(&'static str),
    /// A provider invariant was broken.
    Assert(&'static str),
}

impl fmt::Display for TimeZoneProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoneNotFound => f.write_str("time zone identifier not found"),
            Self::InstantOutOfRange => f.write_str("instant out of supported range"),
            Self::Range(msg) => write!(f, "value out of range: {msg}"),
            Self::Assert(msg) => write!(f, "provider invariant broken: {msg}"),
        }
    }
}

impl core::error::Error for TimeZoneProviderError {}
