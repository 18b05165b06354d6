//! Caller-supplied resolution policies for ambiguous and gap times.

use icu_calendar::AnyCalendarKind;

use offset_provider::InstantAndOffset;

use crate::changeset::RecordState;
use crate::fields::FieldMapping;

/// What a policy callback decided to do with a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyDecision {
    /// Apply this candidate: write its instant and total offset.
    Apply(InstantAndOffset),
    /// The policy fully resolved the record itself (for example by
    /// attaching its own validation error); write nothing further.
    Resolved,
}

/// Business policy for local times that do not map uniquely onto the UTC
/// timeline.
///
/// There is no default policy: resolution takes one explicitly, and the
/// built-in [`UseEarlier`]/[`UseLater`] values cover the common
/// preferences. Both candidates arrive in pre-transition-offset-first
/// order, so `before`/`after` always mean "relative to the offset
/// transition" regardless of which candidate has the larger offset.
///
/// Callbacks must be synchronous and affect the record only through their
/// return value or the `record` handle they are given.
pub trait ResolutionPolicy<R: RecordState> {
    /// Called when the local time denotes two instants (clocks were set
    /// back over it).
    fn on_ambiguous(
        &self,
        record: &mut R,
        before: InstantAndOffset,
        after: InstantAndOffset,
        fields: &FieldMapping,
    ) -> PolicyDecision;

    /// Called when the local time denotes no instant (clocks were set
    /// forward over it); `before` and `after` are the gap's boundary
    /// instants.
    fn on_gap(
        &self,
        record: &mut R,
        before: InstantAndOffset,
        after: InstantAndOffset,
        fields: &FieldMapping,
    ) -> PolicyDecision;

    /// Called when the input's calendar cannot be interpreted by the zone
    /// rules. Returning `None` falls back to attaching a validation error
    /// with the offending calendar as context.
    fn on_incompatible_calendar(
        &self,
        _record: &mut R,
        _calendar: AnyCalendarKind,
        _fields: &FieldMapping,
    ) -> Option<PolicyDecision> {
        None
    }
}

/// Prefers the chronologically earlier candidate: the pre-transition
/// instant of an ambiguity, or the latest instant before a gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseEarlier;

impl<R: RecordState> ResolutionPolicy<R> for UseEarlier {
    fn on_ambiguous(
        &self,
        _: &mut R,
        before: InstantAndOffset,
        _: InstantAndOffset,
        _: &FieldMapping,
    ) -> PolicyDecision {
        PolicyDecision::Apply(before)
    }

    fn on_gap(
        &self,
        _: &mut R,
        before: InstantAndOffset,
        _: InstantAndOffset,
        _: &FieldMapping,
    ) -> PolicyDecision {
        PolicyDecision::Apply(before)
    }
}

/// Prefers the chronologically later candidate: the post-transition
/// instant of an ambiguity, or the earliest instant after a gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct UseLater;

impl<R: RecordState> ResolutionPolicy<R> for UseLater {
    fn on_ambiguous(
        &self,
        _: &mut R,
        _: InstantAndOffset,
        after: InstantAndOffset,
        _: &FieldMapping,
    ) -> PolicyDecision {
        PolicyDecision::Apply(after)
    }

    fn on_gap(
        &self,
        _: &mut R,
        _: InstantAndOffset,
        after: InstantAndOffset,
        _: &FieldMapping,
    ) -> PolicyDecision {
        PolicyDecision::Apply(after)
    }
}
