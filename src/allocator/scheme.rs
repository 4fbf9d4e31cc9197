//! Identifier schemes: a fixed prefix plus a zero-padded sequence number.

use std::num::ParseIntError;

use thiserror::Error;

/// Reasons an [`IdScheme`] cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// The prefix was empty.
    #[error("identifier prefix must not be empty")]
    EmptyPrefix,
    /// The prefix ends in a digit, which would merge with the sequence.
    #[error("identifier prefix {0:?} must not end with a digit")]
    TrailingDigit(String),
    /// The padding width was zero.
    #[error("sequence width must be at least 1")]
    ZeroWidth,
}

/// How identifiers for one entity family are spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdScheme {
    prefix: String,
    width: usize,
}

impl IdScheme {
    /// Padding width used by every family unless configured otherwise.
    pub const DEFAULT_WIDTH: usize = 4;

    /// Creates a scheme with the default width.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is empty or ends with a digit.
    pub fn new(prefix: impl Into<String>) -> Result<Self, SchemeError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(SchemeError::EmptyPrefix);
        }
        if prefix.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(SchemeError::TrailingDigit(prefix));
        }
        Ok(Self { prefix, width: Self::DEFAULT_WIDTH })
    }

    /// Replaces the padding width.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::ZeroWidth`] for a width of zero.
    pub fn with_width(mut self, width: usize) -> Result<Self, SchemeError> {
        if width == 0 {
            return Err(SchemeError::ZeroWidth);
        }
        self.width = width;
        Ok(self)
    }

    /// The fixed prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Minimum number of sequence digits.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Spells sequence number `n`. Numbers wider than the padding widen the
    /// identifier rather than being truncated.
    #[must_use]
    pub fn format(&self, n: u64) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }
}

/// Parses the trailing run of ASCII digits of an identifier.
///
/// Returns `Ok(None)` when the identifier does not end in a digit.
///
/// # Errors
///
/// Returns an error if the digit run does not fit in a `u64`.
pub fn trailing_sequence(property_id: &str) -> Result<Option<u64>, ParseIntError> {
    let head = property_id.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &property_id[head.len()..];
    if digits.is_empty() {
        return Ok(None);
    }
    digits.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_default_padding() {
        let scheme = IdScheme::new("RA-COMLECS").unwrap();
        assert_eq!(scheme.format(1), "RA-COMLECS0001");
        assert_eq!(scheme.format(42), "RA-COMLECS0042");
    }

    #[test]
    fn wide_numbers_widen_the_identifier() {
        let scheme = IdScheme::new("P").unwrap();
        assert_eq!(scheme.format(10_000), "P10000");
    }

    #[test]
    fn custom_width() {
        let scheme = IdScheme::new("RA-PS").unwrap().with_width(2).unwrap();
        assert_eq!(scheme.format(3), "RA-PS03");
        assert_eq!(scheme.format(123), "RA-PS123");
    }

    #[test]
    fn rejects_bad_prefixes_and_widths() {
        assert_eq!(IdScheme::new(""), Err(SchemeError::EmptyPrefix));
        assert!(matches!(IdScheme::new("RA-2"), Err(SchemeError::TrailingDigit(_))));
        assert_eq!(IdScheme::new("P").unwrap().with_width(0), Err(SchemeError::ZeroWidth));
    }

    #[test]
    fn trailing_sequence_extracts_digit_run() {
        assert_eq!(trailing_sequence("RA-COMLECS0007").unwrap(), Some(7));
        assert_eq!(trailing_sequence("P10000").unwrap(), Some(10_000));
        assert_eq!(trailing_sequence("no-digits").unwrap(), None);
        assert!(trailing_sequence("P99999999999999999999999").is_err());
    }
}
