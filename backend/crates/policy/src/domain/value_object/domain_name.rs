//! Domain Name Value Object
//!
//! A domain name is the unit of blocking: domain lists hold validated
//! domain strings, and the proxy layer matches requests against them.
//!
//! ## Invariants
//! - Trimmed, lowercase
//! - At least two dot-separated segments
//! - Each segment at most 63 characters, ASCII alphanumeric plus `_` and `-`
//! - An empty segment is only permitted at the very start: a leading dot
//!   means "this domain and all subdomains"

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length of a single dot-separated segment (DNS label limit)
pub const MAX_SEGMENT_LENGTH: usize = 63;

/// Maximum length of a whole domain name as typed
pub const MAX_INPUT_LENGTH: usize = 254;

/// How much of an overlong segment to echo back in the error message
const SEGMENT_PREVIEW_LENGTH: usize = 10;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when domain name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    /// Whole input is one character or less
    TooShort { length: usize },

    /// Fewer than two dot-separated segments
    TooFewSegments,

    /// A segment exceeds MAX_SEGMENT_LENGTH
    SegmentTooLong { preview: String },

    /// An empty segment anywhere but the leading position
    EmptySegment,

    /// A character outside the allowed set
    InvalidCharacter { char: char },
}

impl fmt::Display for DomainNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { length } => {
                write!(f, "Domain name is too short ({length} chars)")
            }
            Self::TooFewSegments => {
                write!(
                    f,
                    "A domain name needs at least two dot-separated segments, like 'example.com'"
                )
            }
            Self::SegmentTooLong { preview } => {
                write!(
                    f,
                    "Segment '{preview}…' is longer than {MAX_SEGMENT_LENGTH} characters"
                )
            }
            Self::EmptySegment => {
                write!(
                    f,
                    "Empty segments are only allowed at the start of a domain name"
                )
            }
            Self::InvalidCharacter { char } => {
                write!(f, "Invalid character '{char}' in domain name")
            }
        }
    }
}

impl std::error::Error for DomainNameError {}

// ============================================================================
// DomainName Value Object
// ============================================================================

/// Validated, normalized domain name
///
/// # Storage
/// Holds the canonical form: trimmed and lowercased. Serializes as a plain
/// string and validates on deserialization, so a list loaded from storage
/// can only contain admissible entries.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName {
    value: String,
}

impl DomainName {
    /// Create a new DomainName from raw input
    ///
    /// Trims and lowercases, then validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, DomainNameError> {
        let value = input.as_ref().trim().to_lowercase();
        Self::validate(&value)?;
        Ok(Self { value })
    }

    /// Get the canonical domain string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Convert to owned String
    #[inline]
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Coerce a partial, in-flight input into admissible shape.
    ///
    /// This is the keystroke-time companion of [`DomainName::new`]: it never
    /// fails. Disallowed characters are dropped, a leading `.` is prefixed
    /// when the first character is not already one (the
    /// domain-and-all-subdomains convention), the result is truncated to
    /// [`MAX_INPUT_LENGTH`] and lowercased.
    pub fn coerce_input(raw: &str) -> String {
        let mut value: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .collect();

        if !value.is_empty() && !value.starts_with('.') {
            value.insert(0, '.');
        }

        // All remaining characters are ASCII, so the byte index is safe.
        value.truncate(MAX_INPUT_LENGTH);
        value
    }

    /// Validate a normalized candidate
    fn validate(value: &str) -> Result<(), DomainNameError> {
        let length = value.chars().count();
        if length <= 1 {
            return Err(DomainNameError::TooShort { length });
        }

        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() < 2 {
            return Err(DomainNameError::TooFewSegments);
        }

        for (position, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                // ".example.com" is the wildcard convention; "a..com" is not.
                if position == 0 {
                    continue;
                }
                return Err(DomainNameError::EmptySegment);
            }

            if segment.chars().count() > MAX_SEGMENT_LENGTH {
                return Err(DomainNameError::SegmentTooLong {
                    preview: segment.chars().take(SEGMENT_PREVIEW_LENGTH).collect(),
                });
            }

            for ch in segment.chars() {
                if !Self::is_valid_char(ch) {
                    return Err(DomainNameError::InvalidCharacter { char: ch });
                }
            }
        }

        Ok(())
    }

    /// Check if character is valid inside a segment
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '-'
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainName({})", self.value)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = DomainNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.value
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod validation {
        use super::*;

        #[test]
        fn test_plain_domain() {
            let name = DomainName::new("example.com").unwrap();
            assert_eq!(name.as_str(), "example.com");
        }

        #[test]
        fn test_leading_dot_wildcard() {
            let name = DomainName::new(".example.com").unwrap();
            assert_eq!(name.as_str(), ".example.com");
        }

        #[test]
        fn test_subdomains() {
            assert!(DomainName::new("ads.tracker.example.com").is_ok());
        }

        #[test]
        fn test_hyphen_and_underscore() {
            assert!(DomainName::new("ad-server.example.com").is_ok());
            assert!(DomainName::new("_dmarc.example.com").is_ok());
        }

        #[test]
        fn test_single_char_too_short() {
            assert!(matches!(
                DomainName::new("a"),
                Err(DomainNameError::TooShort { length: 1 })
            ));
        }

        #[test]
        fn test_empty_too_short() {
            assert!(matches!(
                DomainName::new(""),
                Err(DomainNameError::TooShort { length: 0 })
            ));
        }

        #[test]
        fn test_no_dot_rejected() {
            assert!(matches!(
                DomainName::new("localhost"),
                Err(DomainNameError::TooFewSegments)
            ));
        }

        #[test]
        fn test_interior_empty_segment() {
            assert!(matches!(
                DomainName::new("a..com"),
                Err(DomainNameError::EmptySegment)
            ));
        }

        #[test]
        fn test_trailing_empty_segment() {
            assert!(matches!(
                DomainName::new("example.com."),
                Err(DomainNameError::EmptySegment)
            ));
        }

        #[test]
        fn test_invalid_symbol_named_in_error() {
            let err = DomainName::new("exa!mple.com").unwrap_err();
            assert_eq!(err, DomainNameError::InvalidCharacter { char: '!' });
            assert!(err.to_string().contains('!'));
        }

        #[test]
        fn test_segment_too_long() {
            let label = "x".repeat(70);
            let err = DomainName::new(format!("{label}.com")).unwrap_err();
            match err {
                DomainNameError::SegmentTooLong { preview } => {
                    assert_eq!(preview, "x".repeat(10));
                }
                other => panic!("expected SegmentTooLong, got {other:?}"),
            }
        }

        #[test]
        fn test_segment_at_limit_ok() {
            let label = "x".repeat(63);
            assert!(DomainName::new(format!("{label}.com")).is_ok());
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn test_lowercased() {
            let name = DomainName::new("Ads.Example.COM").unwrap();
            assert_eq!(name.as_str(), "ads.example.com");
        }

        #[test]
        fn test_trimmed() {
            let name = DomainName::new("  example.com  ").unwrap();
            assert_eq!(name.as_str(), "example.com");
        }
    }

    mod coerce_input {
        use super::*;

        #[test]
        fn test_strips_disallowed_chars() {
            assert_eq!(DomainName::coerce_input(".exa!mple.com"), ".example.com");
        }

        #[test]
        fn test_prefixes_leading_dot() {
            assert_eq!(DomainName::coerce_input("example.com"), ".example.com");
        }

        #[test]
        fn test_keeps_existing_leading_dot() {
            assert_eq!(DomainName::coerce_input(".example.com"), ".example.com");
        }

        #[test]
        fn test_lowercases() {
            assert_eq!(DomainName::coerce_input(".Example.COM"), ".example.com");
        }

        #[test]
        fn test_empty_stays_empty() {
            assert_eq!(DomainName::coerce_input(""), "");
        }

        #[test]
        fn test_truncates_to_input_limit() {
            let raw = "a".repeat(400);
            let coerced = DomainName::coerce_input(&raw);
            assert_eq!(coerced.len(), MAX_INPUT_LENGTH);
        }

        #[test]
        fn test_never_fails_on_garbage() {
            assert_eq!(DomainName::coerce_input("!@#$%"), "");
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serialize_as_string() {
            let name = DomainName::new("example.com").unwrap();
            assert_eq!(serde_json::to_string(&name).unwrap(), "\"example.com\"");
        }

        #[test]
        fn test_deserialize_validates() {
            let ok: Result<DomainName, _> = serde_json::from_str("\"example.com\"");
            assert!(ok.is_ok());

            let bad: Result<DomainName, _> = serde_json::from_str("\"a\"");
            assert!(bad.is_err());
        }
    }
}
