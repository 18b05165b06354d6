//! A transition-table backed [`TimeZoneOffsetProvider`].
//!
//! `FixedRuleProvider` serves zones from explicit offset regimes: an
//! initial offset plus a sorted list of `(transition epoch, offset)`
//! entries. It is the reference implementation used by the `tz_anchor`
//! test suite, and is equally usable by callers that load their own
//! tables (e.g. extracted from a tzdb snapshot at deploy time).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::provider::{InstantAndOffset, LocalMapping, OffsetInfo, TimeZoneOffsetProvider};
use crate::{EpochSeconds, LocalDateTime, TimeZoneProviderError};

/// The offset regimes of a single zone.
///
/// Transitions must be pushed in ascending epoch order; each entry takes
/// effect at its epoch and lasts until the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRules {
    initial: OffsetInfo,
    transitions: Vec<(i64, OffsetInfo)>,
}

impl ZoneRules {
    pub fn new(initial: OffsetInfo) -> Self {
        Self {
            initial,
            transitions: Vec::new(),
        }
    }

    pub fn with_transition(mut self, epoch: i64, offset: OffsetInfo) -> Self {
        debug_assert!(
            self.transitions.last().is_none_or(|(last, _)| *last < epoch),
            "transitions must be pushed in ascending epoch order"
        );
        self.transitions.push((epoch, offset));
        self
    }

    /// The offset in effect at a UTC instant.
    fn offset_at(&self, instant: i64) -> OffsetInfo {
        let idx = self.transitions.partition_point(|(epoch, _)| *epoch <= instant);
        if idx == 0 {
            self.initial
        } else {
            self.transitions[idx - 1].1
        }
    }

    /// Iterates every regime as `(start, end, offset)` half-open windows.
    fn regimes(&self) -> impl Iterator<Item = (i64, i64, OffsetInfo)> + '_ {
        let starts = core::iter::once(i64::MIN)
            .chain(self.transitions.iter().map(|(epoch, _)| *epoch));
        let ends = self
            .transitions
            .iter()
            .map(|(epoch, _)| *epoch)
            .chain(core::iter::once(i64::MAX));
        let offsets = core::iter::once(self.initial)
            .chain(self.transitions.iter().map(|(_, offset)| *offset));
        starts.zip(ends).zip(offsets).map(|((s, e), o)| (s, e, o))
    }

    fn map_local(&self, local_seconds: i64) -> Result<LocalMapping, TimeZoneProviderError> {
        let mut candidates: Vec<InstantAndOffset> = Vec::new();
        for (start, end, offset) in self.regimes() {
            let instant = local_seconds - offset.total().0;
            if start <= instant && instant < end {
                let instant = EpochSeconds(instant);
                instant.check_validity()?;
                candidates.push(InstantAndOffset::new(instant, offset));
            }
        }
        match candidates.len() {
            1 => Ok(LocalMapping::Unique(candidates[0])),
            // Regime order is chronological, so the pre-transition offset
            // comes first.
            2 => Ok(LocalMapping::Ambiguous([candidates[0], candidates[1]])),
            0 => self.map_gap(local_seconds),
            _ => Err(TimeZoneProviderError::Assert(
                "local time matched more than two offset regimes",
            )),
        }
    }

    /// Locates the offset increase that skipped over `local_seconds` and
    /// returns the latest valid instant before the gap and the earliest
    /// valid instant after it.
    fn map_gap(&self, local_seconds: i64) -> Result<LocalMapping, TimeZoneProviderError> {
        let mut previous = self.initial;
        for &(epoch, next) in &self.transitions {
            let skipped_from = epoch + previous.total().0;
            let skipped_until = epoch + next.total().0;
            if skipped_from <= local_seconds && local_seconds < skipped_until {
                let before = EpochSeconds(epoch - 1);
                let after = EpochSeconds(epoch);
                before.check_validity()?;
                after.check_validity()?;
                return Ok(LocalMapping::Gap([
                    InstantAndOffset::new(before, previous),
                    InstantAndOffset::new(after, next),
                ]));
            }
            previous = next;
        }
        Err(TimeZoneProviderError::Assert(
            "local time matched no offset regime and no gap",
        ))
    }
}

/// A provider over a fixed set of zones, keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct FixedRuleProvider {
    zones: BTreeMap<String, ZoneRules>,
}

impl FixedRuleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, identifier: &str, rules: ZoneRules) -> Self {
        self.zones.insert(String::from(identifier), rules);
        self
    }

    fn rules(&self, zone: &str) -> Result<&ZoneRules, TimeZoneProviderError> {
        self.zones
            .get(zone)
            .ok_or(TimeZoneProviderError::ZoneNotFound)
    }
}

impl TimeZoneOffsetProvider for FixedRuleProvider {
    fn offset_for_local(
        &self,
        local: LocalDateTime,
        zone: &str,
    ) -> Result<LocalMapping, TimeZoneProviderError> {
        let rules = self.rules(zone)?;
        if !local.is_iso() {
            return Ok(LocalMapping::IncompatibleCalendar(local.calendar));
        }
        rules.map_local(local.civil.as_utc_seconds())
    }

    fn offset_for_instant(
        &self,
        instant: EpochSeconds,
        zone: &str,
    ) -> Result<OffsetInfo, TimeZoneProviderError> {
        let rules = self.rules(zone)?;
        instant.check_validity()?;
        Ok(rules.offset_at(instant.0))
    }
}
