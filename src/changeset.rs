//! The record/changeset collaborator.
//!
//! The resolve and reconstruct operations do not own a persistence or
//! validation framework; they speak to one through [`RecordState`]. The
//! trait exposes exactly what the operations need: per-field validation
//! errors, the set of fields changed in the current update, role-typed
//! access to the four mapped fields, and error attachment.
//!
//! [`Changeset`] is a self-contained in-memory implementation, suitable
//! both as a working change buffer for simple callers and as the test
//! double for the operations themselves.

use alloc::string::String;
use alloc::vec::Vec;

use icu_calendar::AnyCalendarKind;
use rustc_hash::{FxHashMap, FxHashSet};

use offset_provider::{EpochSeconds, LocalDateTime};

/// Structured context attached to a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    /// The offending calendar of a calendar-incompatibility error.
    Calendar(AnyCalendarKind),
}

/// A validation error attached to a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: &'static str,
    pub context: Option<ErrorContext>,
}

/// The post conversion field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A wall-clock datetime plus calendar.
    LocalDateTime(LocalDateTime),
    /// A time zone identifier.
    Zone(String),
    /// A UTC instant.
    Instant(EpochSeconds),
    /// A total offset in seconds.
    OffsetSeconds(i64),
}

/// The record state consumed and mutated by the resolve/reconstruct
/// operations.
///
/// Getters are role-typed: a field holding a value of the wrong role is
/// treated as absent. Implementations are expected to be plain in-memory
/// objects; the operations never call back into them concurrently.
pub trait RecordState {
    /// Whether the named field was changed in this update.
    fn is_changed(&self, field: &str) -> bool;

    /// Whether the named field currently carries a validation error.
    fn has_error(&self, field: &str) -> bool;

    /// The wall-clock value of the named field, if present.
    fn local_datetime(&self, field: &str) -> Option<LocalDateTime>;

    /// The time zone identifier value of the named field, if present.
    fn zone_identifier(&self, field: &str) -> Option<&str>;

    /// The UTC instant value of the named field, if present.
    fn instant(&self, field: &str) -> Option<EpochSeconds>;

    /// The total-offset value of the named field, if present.
    fn offset_seconds(&self, field: &str) -> Option<i64>;

    /// Sets the named field to a UTC instant.
    fn set_instant(&mut self, field: &str, value: EpochSeconds);

    /// Sets the named field to a total offset in seconds.
    fn set_offset_seconds(&mut self, field: &str, value: i64);

    /// Attaches a validation error to the named field.
    fn add_error(&mut self, field: &str, message: &'static str, context: Option<ErrorContext>);
}

/// An in-memory change buffer.
#[derive(Debug, Default, Clone)]
pub struct Changeset {
    values: FxHashMap<String, FieldValue>,
    changed: FxHashSet<String>,
    errors: Vec<FieldError>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a wall-clock input value and marks the field changed.
    pub fn set_local_datetime(&mut self, field: &str, value: LocalDateTime) {
        self.insert(field, FieldValue::LocalDateTime(value));
    }

    /// Stages a time zone identifier and marks the field changed.
    pub fn set_zone_identifier(&mut self, field: &str, value: &str) {
        self.insert(field, FieldValue::Zone(String::from(value)));
    }

    /// The raw value of a field, if any.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// All validation errors attached so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Forgets which fields were changed, e.g. after a commit. Values and
    /// errors are kept.
    pub fn clear_changes(&mut self) {
        self.changed.clear();
    }

    fn insert(&mut self, field: &str, value: FieldValue) {
        self.values.insert(String::from(field), value);
        self.changed.insert(String::from(field));
    }
}

impl RecordState for Changeset {
    fn is_changed(&self, field: &str) -> bool {
        self.changed.contains(field)
    }

    fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    fn local_datetime(&self, field: &str) -> Option<LocalDateTime> {
        match self.values.get(field) {
            Some(FieldValue::LocalDateTime(value)) => Some(*value),
            _ => None,
        }
    }

    fn zone_identifier(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(FieldValue::Zone(value)) => Some(value),
            _ => None,
        }
    }

    fn instant(&self, field: &str) -> Option<EpochSeconds> {
        match self.values.get(field) {
            Some(FieldValue::Instant(value)) => Some(*value),
            _ => None,
        }
    }

    fn offset_seconds(&self, field: &str) -> Option<i64> {
        match self.values.get(field) {
            Some(FieldValue::OffsetSeconds(value)) => Some(*value),
            _ => None,
        }
    }

    fn set_instant(&mut self, field: &str, value: EpochSeconds) {
        self.insert(field, FieldValue::Instant(value));
    }

    fn set_offset_seconds(&mut self, field: &str, value: i64) {
        self.insert(field, FieldValue::OffsetSeconds(value));
    }

    fn add_error(&mut self, field: &str, message: &'static str, context: Option<ErrorContext>) {
        self.errors.push(FieldError {
            field: String::from(field),
            message,
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offset_provider::CivilDateTime;

    #[test]
    fn staged_values_are_marked_changed() {
        let mut changeset = Changeset::new();
        assert!(!changeset.is_changed("time_zone"));
        changeset.set_zone_identifier("time_zone", "Europe/Berlin");
        assert!(changeset.is_changed("time_zone"));
        assert_eq!(changeset.zone_identifier("time_zone"), Some("Europe/Berlin"));
    }

    #[test]
    fn role_typed_getters_ignore_other_roles() {
        let mut changeset = Changeset::new();
        changeset.set_zone_identifier("field", "UTC");
        assert!(changeset.local_datetime("field").is_none());
        assert!(changeset.instant("field").is_none());
        assert!(changeset.offset_seconds("field").is_none());
    }

    #[test]
    fn errors_invalidate() {
        let mut changeset = Changeset::new();
        let civil = CivilDateTime::try_new(2019, 1, 1, 10, 0, 0).unwrap();
        changeset.set_local_datetime("input_datetime", LocalDateTime::new(civil));
        assert!(changeset.is_valid());
        changeset.add_error("time_zone", "is invalid", None);
        assert!(!changeset.is_valid());
        assert!(changeset.has_error("time_zone"));
        assert!(!changeset.has_error("input_datetime"));
    }
}
