//! Recovery of the originally-intended local time from a stored instant.
//!
//! A record stores the resolved UTC instant together with the total offset
//! that was in effect when it was resolved. If the zone's rules have since
//! been redefined, interpreting the instant under the current rules yields
//! a different wall time than the user originally entered; the recorded
//! offset is what lets us notice and reconstruct the intended reading.

use crate::changeset::RecordState;
use crate::fields::FieldMapping;
use crate::provider::{CivilDateTime, EpochSeconds, OffsetInfo, TimeZoneOffsetProvider};
use crate::{AnchorError, AnchorResult};

/// A wall-clock reading together with the offset it was read under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedStamp {
    pub civil: CivilDateTime,
    pub offset: OffsetInfo,
}

impl ZonedStamp {
    fn new(instant: EpochSeconds, offset: OffsetInfo) -> Self {
        Self {
            civil: offset.civil(instant),
            offset,
        }
    }
}

/// The outcome of reconstructing a stored instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovered {
    /// The zone rules still agree with the recorded offset; this is the
    /// one correct local reading.
    Intact(ZonedStamp),
    /// The zone rules changed since the instant was resolved.
    Drifted {
        /// The stored instant read under the current rules.
        current: ZonedStamp,
        /// The wall time the user originally entered, shifted off
        /// `current` by exactly the recorded-minus-current offset
        /// difference.
        intended: ZonedStamp,
    },
}

/// Reconstructs the local reading of a stored instant, detecting rule
/// drift against the offset recorded at resolution time.
///
/// When the current total offset differs from `recorded_offset`, the
/// intended wall time sits `recorded_offset - current_offset` seconds away
/// from the current reading; its offset metadata is taken from the zone at
/// that shifted position on the timeline.
pub fn recover_original_datetime(
    instant: EpochSeconds,
    zone: &str,
    recorded_offset: i64,
    provider: &impl TimeZoneOffsetProvider,
) -> AnchorResult<Recovered> {
    let current = provider.offset_for_instant(instant, zone)?;
    let delta = recorded_offset - current.total().0;
    if delta == 0 {
        return Ok(Recovered::Intact(ZonedStamp::new(instant, current)));
    }
    #[cfg(feature = "log")]
    log::warn!(
        "offset rules of {zone} drifted by {delta:+}s since instant {} was resolved",
        instant.0,
    );
    let shifted = EpochSeconds(instant.0 + delta);
    let intended_offset = provider.offset_for_instant(shifted, zone)?;
    let intended = ZonedStamp {
        civil: CivilDateTime::from_epoch_seconds(instant.0 + current.total().0 + delta),
        offset: intended_offset,
    };
    Ok(Recovered::Drifted {
        current: ZonedStamp::new(instant, current),
        intended,
    })
}

/// Record-backed form of [`recover_original_datetime`]: reads the stored
/// instant, zone and recorded offset from the mapped fields.
///
/// Unlike resolution, reconstruction has no no-op path: a record that is
/// missing any of the three stored fields cannot be interpreted at all,
/// which is a terminal error rather than a validation problem.
pub fn recover_record<R: RecordState>(
    record: &R,
    fields: &FieldMapping,
    provider: &impl TimeZoneOffsetProvider,
) -> AnchorResult<Recovered> {
    fields.validate()?;
    let instant = record
        .instant(&fields.datetime)
        .ok_or_else(|| AnchorError::range().with_message("record has no stored instant"))?;
    let zone = record
        .zone_identifier(&fields.time_zone)
        .ok_or_else(|| AnchorError::range().with_message("record has no time zone identifier"))?;
    let recorded_offset = record
        .offset_seconds(&fields.original_offset)
        .ok_or_else(|| AnchorError::range().with_message("record has no recorded offset"))?;
    recover_original_datetime(instant, zone, recorded_offset, provider)
}
