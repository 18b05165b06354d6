//! The `TimeZoneOffsetProvider` trait.

use icu_calendar::AnyCalendarKind;
use tinystr::TinyAsciiStr;

use crate::{CivilDateTime, EpochSeconds, LocalDateTime, TimeZoneProviderError};

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to the UTC to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UtcOffsetSeconds(pub i64);

/// The offset data in effect in a zone at one concrete instant.
///
/// The total offset applied to UTC is the standard offset plus the
/// seasonal (daylight-saving) adjustment; the two are kept separate so
/// callers can record where a total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetInfo {
    /// The zone's standard offset from UTC, in seconds.
    pub utc_offset: UtcOffsetSeconds,
    /// The seasonal adjustment applied on top of the standard offset.
    pub std_offset: UtcOffsetSeconds,
    /// The zone abbreviation in effect, e.g. `CET`.
    pub abbreviation: TinyAsciiStr<10>,
}

impl OffsetInfo {
    pub fn new(utc_offset: i64, std_offset: i64, abbreviation: TinyAsciiStr<10>) -> Self {
        Self {
            utc_offset: UtcOffsetSeconds(utc_offset),
            std_offset: UtcOffsetSeconds(std_offset),
            abbreviation,
        }
    }

    /// The total offset applied to UTC to reach local time.
    pub fn total(&self) -> UtcOffsetSeconds {
        UtcOffsetSeconds(self.utc_offset.0 + self.std_offset.0)
    }

    /// The local wall-clock reading of `instant` under this offset.
    pub fn civil(&self, instant: EpochSeconds) -> CivilDateTime {
        CivilDateTime::from_epoch_seconds(instant.0 + self.total().0)
    }
}

/// An `EpochSeconds` and the offset it was resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantAndOffset {
    /// The resolved instant.
    pub instant: EpochSeconds,
    /// The offset in effect at `instant` in the given time zone.
    pub offset: OffsetInfo,
}

impl InstantAndOffset {
    pub fn new(instant: EpochSeconds, offset: OffsetInfo) -> Self {
        Self { instant, offset }
    }
}

/// How a wall-clock datetime maps onto the UTC timeline in one zone.
///
/// Ambiguous candidates and gap boundaries are always ordered with the
/// offset in effect *before* the transition first, so callers can prefer
/// "the instant before" or "the instant after" without re-deriving which
/// is which.
#[derive(Debug, Clone, Copy)]
pub enum LocalMapping {
    /// Exactly one instant corresponds to the local time.
    Unique(InstantAndOffset),
    /// The zone's offset decreased over the local time; two instants
    /// correspond to it, pre-transition offset first.
    Ambiguous([InstantAndOffset; 2]),
    /// The zone's offset increased over the local time; no instant
    /// corresponds to it. The entries are the latest valid instant before
    /// the gap and the earliest valid instant after it.
    Gap([InstantAndOffset; 2]),
    /// The local datetime uses a calendar the zone rules cannot interpret.
    IncompatibleCalendar(AnyCalendarKind),
}

impl LocalMapping {
    pub fn as_slice(&self) -> &[InstantAndOffset] {
        match *self {
            Self::Unique(ref one) => core::slice::from_ref(one),
            Self::Ambiguous(ref multiple) | Self::Gap(ref multiple) => &multiple[..],
            Self::IncompatibleCalendar(..) => &[],
        }
    }
}

/// The `TimeZoneOffsetProvider` trait provides the methods required for a
/// provider to implement in order to source time zone data from that
/// provider.
pub trait TimeZoneOffsetProvider {
    /// Maps a wall-clock datetime onto the UTC timeline in the named zone.
    fn offset_for_local(
        &self,
        local: LocalDateTime,
        zone: &str,
    ) -> Result<LocalMapping, TimeZoneProviderError>;

    /// Returns the offset data in effect at a UTC instant in the named zone.
    fn offset_for_instant(
        &self,
        instant: EpochSeconds,
        zone: &str,
    ) -> Result<OffsetInfo, TimeZoneProviderError>;
}

pub struct NeverProvider;

impl TimeZoneOffsetProvider for NeverProvider {
    fn offset_for_local(
        &self,
        _: LocalDateTime,
        _: &str,
    ) -> Result<LocalMapping, TimeZoneProviderError> {
        unimplemented!()
    }

    fn offset_for_instant(
        &self,
        _: EpochSeconds,
        _: &str,
    ) -> Result<OffsetInfo, TimeZoneProviderError> {
        unimplemented!()
    }
}
