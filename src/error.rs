//! The `AnchorError` type.

use alloc::borrow::Cow;
use core::fmt;

use offset_provider::TimeZoneProviderError;

/// `ErrorKind` classifies the terminal errors of this crate.
///
/// Data-shape problems (unknown zone during resolution, incompatible
/// calendar, missing input) never surface here; those become field errors
/// on the record. See the crate docs for the full taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller wiring bug, e.g. a field mapping that is not made of
    /// valid field identifiers.
    Config,
    /// The zone identifier is unknown to the provider at reconstruction
    /// time (rules removed, identifier retired).
    ZoneNotFound,
    /// A value fell outside its valid range.
    Range,
    /// An internal invariant was broken.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => "ConfigError",
            Self::ZoneNotFound => "ZoneNotFoundError",
            Self::Range => "RangeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type returned by the fallible operations of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl AnchorError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a configuration error.
    pub const fn config() -> Self {
        Self::new(ErrorKind::Config)
    }

    /// Creates a zone-not-found error.
    pub const fn zone_not_found() -> Self {
        Self::new(ErrorKind::ZoneNotFound)
    }

    /// Creates a range error.
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates an invariant-violation error.
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to the error.
    pub fn with_message(mut self, msg: &'static str) -> Self {
        self.msg = Cow::Borrowed(msg);
        self
    }

    /// Returns this error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl core::error::Error for AnchorError {}

impl From<TimeZoneProviderError> for AnchorError {
    fn from(value: TimeZoneProviderError) -> Self {
        match value {
            TimeZoneProviderError::ZoneNotFound => {
                Self::zone_not_found().with_message("time zone identifier is not recognized")
            }
            TimeZoneProviderError::InstantOutOfRange => {
                Self::range().with_message("instant is not within the supported range")
            }
            TimeZoneProviderError::Range(msg) => Self::range().with_message(msg),
            TimeZoneProviderError::Assert(msg) => Self::assert().with_message(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AnchorError::config().with_message("field mapping is not valid");
        assert_eq!(err.to_string(), "ConfigError: field mapping is not valid");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn provider_errors_translate() {
        let err: AnchorError = TimeZoneProviderError::ZoneNotFound.into();
        assert_eq!(err.kind(), ErrorKind::ZoneNotFound);
        let err: AnchorError = TimeZoneProviderError::InstantOutOfRange.into();
        assert_eq!(err.kind(), ErrorKind::Range);
    }
}
