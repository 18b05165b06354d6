//! Resolution of wall-clock input into a persisted UTC instant.

use alloc::string::String;

use crate::changeset::{ErrorContext, RecordState};
use crate::fields::FieldMapping;
use crate::policy::{PolicyDecision, ResolutionPolicy};
use crate::provider::{InstantAndOffset, LocalMapping, TimeZoneOffsetProvider};
use crate::{AnchorError, AnchorResult};

use offset_provider::TimeZoneProviderError;

#[cfg(test)]
mod tests;

/// Resolves the record's wall-clock input into a UTC instant.
///
/// Reads the mapped `input_datetime` and `time_zone` fields, asks the
/// provider how the wall time maps onto the UTC timeline, and writes the
/// chosen instant and its total offset to the mapped `datetime` and
/// `original_offset` fields. Ambiguous and gap times are handed to the
/// policy; a zone or calendar problem becomes a validation error on the
/// record rather than an `Err`.
///
/// The operation passes the record through untouched when either input
/// field already carries a validation error, when neither input field was
/// changed in this update, or when either input value is absent. It never
/// errors for missing input; the only `Err` values are an invalid field
/// mapping (wiring bug) and a broken provider invariant.
pub fn resolve_local_datetime<R: RecordState>(
    record: &mut R,
    fields: &FieldMapping,
    policy: &impl ResolutionPolicy<R>,
    provider: &impl TimeZoneOffsetProvider,
) -> AnchorResult<()> {
    fields.validate()?;

    if record.has_error(&fields.input_datetime) || record.has_error(&fields.time_zone) {
        return Ok(());
    }
    if !record.is_changed(&fields.input_datetime) && !record.is_changed(&fields.time_zone) {
        return Ok(());
    }
    let Some(local) = record.local_datetime(&fields.input_datetime) else {
        return Ok(());
    };
    let Some(zone) = record.zone_identifier(&fields.time_zone) else {
        return Ok(());
    };
    let zone = String::from(zone);

    let decision = match provider.offset_for_local(local, &zone) {
        Ok(LocalMapping::Unique(candidate)) => PolicyDecision::Apply(candidate),
        Ok(LocalMapping::Ambiguous([before, after])) => {
            policy.on_ambiguous(record, before, after, fields)
        }
        Ok(LocalMapping::Gap([before, after])) => policy.on_gap(record, before, after, fields),
        Ok(LocalMapping::IncompatibleCalendar(calendar)) => {
            match policy.on_incompatible_calendar(record, calendar, fields) {
                Some(decision) => decision,
                None => {
                    record.add_error(
                        &fields.time_zone,
                        "is incompatible with the input calendar",
                        Some(ErrorContext::Calendar(calendar)),
                    );
                    return Ok(());
                }
            }
        }
        Err(TimeZoneProviderError::ZoneNotFound) => {
            record.add_error(&fields.time_zone, "is invalid", None);
            return Ok(());
        }
        Err(TimeZoneProviderError::InstantOutOfRange | TimeZoneProviderError::Range(_)) => {
            record.add_error(&fields.input_datetime, "is invalid", None);
            return Ok(());
        }
        Err(err @ TimeZoneProviderError::Assert(_)) => return Err(AnchorError::from(err)),
    };

    if let PolicyDecision::Apply(candidate) = decision {
        apply_candidate(record, fields, &zone, candidate);
    }
    Ok(())
}

/// Writes the two derived fields. They are never written separately.
fn apply_candidate<R: RecordState>(
    record: &mut R,
    fields: &FieldMapping,
    zone: &str,
    candidate: InstantAndOffset,
) {
    record.set_instant(&fields.datetime, candidate.instant);
    record.set_offset_seconds(&fields.original_offset, candidate.offset.total().0);
    #[cfg(feature = "log")]
    log::debug!(
        "resolved wall time in {zone} to {} ({} {:+}s)",
        candidate.instant.0,
        candidate.offset.abbreviation,
        candidate.offset.total().0,
    );
    #[cfg(not(feature = "log"))]
    let _ = zone;
}
