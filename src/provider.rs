//! Re-exports of the `TimeZoneOffsetProvider` vocabulary.
//!
//! The provider interface lives in the `offset_provider` crate so data
//! sources can implement it without depending on the record-facing core;
//! this module re-exports it for convenience.

pub use offset_provider::provider::{
    InstantAndOffset, LocalMapping, NeverProvider, OffsetInfo, TimeZoneOffsetProvider,
    UtcOffsetSeconds,
};
pub use offset_provider::{
    CivilDateTime, EpochSeconds, FixedRuleProvider, LocalDateTime, TimeZoneProviderError,
    ZoneRules,
};
