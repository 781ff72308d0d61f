//! Error types for repository name and digest validation.
//!
//! Both error types carry the exact human-readable message describing the
//! violated grammar rule; callers are expected to reject or report the input.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A repository name failed the path-component grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidNameError {
    message: String,
}

impl InvalidNameError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the description of the violated rule.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A digest string failed the `algorithm:hexdata` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidDigestError {
    message: String,
}

impl InvalidDigestError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the description of the violated rule.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur in dockhub core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Repository name is invalid.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    /// Digest is invalid.
    #[error(transparent)]
    InvalidDigest(#[from] InvalidDigestError),

    /// Registry error payload could not be decoded.
    #[error("Failed to decode registry error payload: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Quotes user-supplied text for inclusion in an error message.
///
/// Single quotes are used unless the text contains a `'` and no `"`.
/// Backslashes, the chosen quote and non-printable characters are escaped,
/// control characters as `\xNN`.
pub(crate) fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            // Control characters all lie below U+00A0.
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = InvalidNameError::new("repository name may not be empty");
        assert_eq!(err.to_string(), "repository name may not be empty");
        assert_eq!(err.message(), "repository name may not be empty");
    }

    #[test]
    fn test_error_transparent() {
        let err: Error = InvalidDigestError::new("digest must include separator: 'xyz'").into();
        assert_eq!(err.to_string(), "digest must include separator: 'xyz'");
    }

    #[test]
    fn test_quoted_escapes_control_characters() {
        assert_eq!(quoted("abc"), "'abc'");
        assert_eq!(quoted("a\nb"), "'a\\nb'");
        assert_eq!(quoted("a\0b"), "'a\\x00b'");
        assert_eq!(quoted("a\u{7f}b"), "'a\\x7fb'");
        assert_eq!(quoted("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_quoted_picks_quote_character() {
        assert_eq!(quoted("it's"), "\"it's\"");
        assert_eq!(quoted("say \"hi\""), "'say \"hi\"'");
        assert_eq!(quoted("it's \"x\""), "'it\\'s \"x\"'");
        assert_eq!(quoted("caf\u{e9}"), "'caf\u{e9}'");
    }
}
