//! Field-name configuration for record-backed operations.

use alloc::borrow::Cow;

use crate::{AnchorError, AnchorResult};

/// The names of the four record fields the resolve/reconstruct operations
/// read and write.
///
/// The defaults match the canonical names; callers whose schema differs
/// override them. Every name must be a valid field identifier — a mapping
/// that is not is a wiring bug and fails fast with a configuration error
/// before any record access happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// The transient wall-clock input field.
    pub input_datetime: Cow<'static, str>,
    /// The time zone identifier field.
    pub time_zone: Cow<'static, str>,
    /// The persisted UTC instant field.
    pub datetime: Cow<'static, str>,
    /// The persisted total-offset field, in seconds.
    pub original_offset: Cow<'static, str>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            input_datetime: Cow::Borrowed("input_datetime"),
            time_zone: Cow::Borrowed("time_zone"),
            datetime: Cow::Borrowed("datetime"),
            original_offset: Cow::Borrowed("original_offset"),
        }
    }
}

impl FieldMapping {
    /// Checks that all four names are valid field identifiers.
    pub fn validate(&self) -> AnchorResult<()> {
        let names = [
            &self.input_datetime,
            &self.time_zone,
            &self.datetime,
            &self.original_offset,
        ];
        if names.iter().all(|name| is_valid_field_identifier(name)) {
            return Ok(());
        }
        Err(AnchorError::config()
            .with_message("field mapping contains a name that is not a valid field identifier"))
    }
}

/// A field identifier is ASCII alphanumeric/underscore and does not start
/// with a digit.
fn is_valid_field_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn default_names() {
        let mapping = FieldMapping::default();
        assert_eq!(mapping.input_datetime, "input_datetime");
        assert_eq!(mapping.time_zone, "time_zone");
        assert_eq!(mapping.datetime, "datetime");
        assert_eq!(mapping.original_offset, "original_offset");
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn custom_names_validate() {
        let mapping = FieldMapping {
            input_datetime: Cow::Borrowed("starts_at_wall"),
            time_zone: Cow::Borrowed("tz"),
            datetime: Cow::Borrowed("starts_at_utc"),
            original_offset: Cow::Borrowed("_offset2"),
        };
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn invalid_names_fail_fast() {
        for bad in ["", "1datetime", "date-time", "date time", "zeit\u{f6}ne"] {
            let mapping = FieldMapping {
                time_zone: Cow::Owned(bad.into()),
                ..Default::default()
            };
            let err = mapping.validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{bad:?} should be rejected");
        }
    }
}
