//! `tz_anchor` resolves user-entered wall-clock datetimes into UTC
//! instants and recovers them later, even after the zone's offset rules
//! have changed.
//!
//! The crate is built for database-backed applications storing
//! future-dated, timezone-aware appointments. Two operations cover the
//! record lifecycle:
//!
//! - [`resolve_local_datetime`] runs before a record is committed. It
//!   maps the wall-clock input plus a zone identifier onto the UTC
//!   timeline and writes the chosen instant together with the total
//!   offset in effect at that instant. Local times that are ambiguous or
//!   skipped by an offset transition are decided by a caller-supplied
//!   [`ResolutionPolicy`].
//! - [`recover_original_datetime`] runs whenever a stored record is read
//!   back. It re-derives the local reading under the *current* zone rules
//!   and compares the current total offset against the one recorded at
//!   resolution time; a mismatch means the rules drifted, and both the
//!   current and the originally-intended readings are returned.
//!
//! Zone data is consumed through the [`TimeZoneOffsetProvider`] trait of
//! the `offset_provider` crate, so rule sourcing stays swappable.
//!
//! ## Errors
//!
//! Problems with the *data* (unknown zone, incompatible calendar,
//! out-of-range input) are attached to the record as field-level
//! validation errors during resolution; the operation still returns
//! `Ok`. [`AnchorError`] is reserved for terminal conditions: caller
//! wiring bugs, unreadable stored records and broken provider
//! invariants.
//!
//! ```
//! use tz_anchor::provider::{CivilDateTime, LocalDateTime, OffsetInfo};
//! use tz_anchor::provider::{FixedRuleProvider, ZoneRules};
//! use tz_anchor::{resolve_local_datetime, Changeset, FieldMapping, UseEarlier};
//!
//! let provider = FixedRuleProvider::new().with_zone(
//!     "Europe/Berlin",
//!     ZoneRules::new(OffsetInfo::new(3600, 0, tinystr::tinystr!(10, "CET"))),
//! );
//! let mut record = Changeset::new();
//! let civil = CivilDateTime::try_new(2019, 1, 1, 10, 0, 0)?;
//! record.set_local_datetime("input_datetime", LocalDateTime::new(civil));
//! record.set_zone_identifier("time_zone", "Europe/Berlin");
//! resolve_local_datetime(&mut record, &FieldMapping::default(), &UseEarlier, &provider)?;
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

pub mod changeset;
mod error;
mod fields;
pub mod policy;
pub mod provider;
mod reconstruct;
mod resolve;

pub use changeset::{Changeset, ErrorContext, FieldError, FieldValue, RecordState};
pub use error::{AnchorError, ErrorKind};
pub use fields::FieldMapping;
pub use policy::{PolicyDecision, ResolutionPolicy, UseEarlier, UseLater};
pub use reconstruct::{recover_original_datetime, recover_record, Recovered, ZonedStamp};
pub use resolve::resolve_local_datetime;

/// The `Result` type returned by the fallible operations of this crate.
pub type AnchorResult<T> = core::result::Result<T, AnchorError>;
