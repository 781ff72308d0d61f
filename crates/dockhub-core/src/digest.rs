//! Content digests.
//!
//! A digest identifies an immutable blob or manifest by an algorithm-tagged
//! hash, written as `algorithm:hexdata` (for example
//! `sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::error::{quoted, InvalidDigestError};

/// Separator between the algorithm name and the hex data.
pub const DIGEST_SEPARATOR: char = ':';

/// Number of hex digits in a SHA-256 digest.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Digest algorithm.
///
/// The algorithm name is used verbatim in the text form of a digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestAlgorithm {
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// All known algorithms.
    pub const ALL: [Self; 1] = [Self::Sha256];

    /// Returns the algorithm name as used in digest text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Looks up an algorithm by exact (case-sensitive) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|algorithm| algorithm.name() == name)
    }

    /// Validates an algorithm name.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a known algorithm.
    pub fn validate(name: &str) -> Result<Self, InvalidDigestError> {
        Self::from_name(name).ok_or_else(|| {
            InvalidDigestError::new(format!("unknown digest algorithm: {}", quoted(name)))
        })
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = InvalidDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

/// Returns the normalized (lowercase) form of digest hex data.
///
/// Normalization never changes the numeric value of the data.
#[must_use]
pub fn normalize_hex(hex: &str) -> String {
    hex.to_ascii_lowercase()
}

/// Validates digest hex data for the given algorithm.
///
/// Both upper and lower case hexadecimal digits are accepted.
///
/// # Errors
///
/// Returns an error if `hex` contains a non-hexadecimal character, or does not
/// have the length required by `algorithm`.
pub fn validate_hex(hex: &str, algorithm: DigestAlgorithm) -> Result<(), InvalidDigestError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InvalidDigestError::new(format!(
            "digest hex data may only contain hexadecimal numbers: {}",
            quoted(hex)
        )));
    }

    match algorithm {
        DigestAlgorithm::Sha256 => {
            if hex.len() != SHA256_HEX_LENGTH {
                return Err(InvalidDigestError::new(format!(
                    "SHA-256 digest hex data must contain {SHA256_HEX_LENGTH} digits: {}",
                    quoted(hex)
                )));
            }
        }
    }

    Ok(())
}

/// A validated content digest.
///
/// The hex data is stored in normalized (lowercase) form, so two digests that
/// differ only in hex case compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    hex: String,
}

impl Digest {
    /// Creates a digest from an algorithm and hex data.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex data is not valid for the algorithm.
    pub fn new(algorithm: DigestAlgorithm, hex: &str) -> Result<Self, InvalidDigestError> {
        validate_hex(hex, algorithm)?;
        Ok(Self {
            algorithm,
            hex: normalize_hex(hex),
        })
    }

    /// Parses a digest from its text form.
    ///
    /// The text is split on the first `:` only; any further colons end up in
    /// the hex data and are rejected there.
    ///
    /// # Errors
    ///
    /// Returns an error if the separator is missing, the algorithm is unknown,
    /// or the hex data is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_core::Digest;
    ///
    /// let err = Digest::from_text("xyz").unwrap_err();
    /// assert_eq!(err.to_string(), "digest must include separator: 'xyz'");
    ///
    /// let err = Digest::from_text("sha9:aa").unwrap_err();
    /// assert_eq!(err.to_string(), "unknown digest algorithm 'sha9' in digest 'sha9:aa'");
    /// ```
    pub fn from_text(text: &str) -> Result<Self, InvalidDigestError> {
        let Some((algorithm_name, hex)) = text.split_once(DIGEST_SEPARATOR) else {
            return Err(InvalidDigestError::new(format!(
                "digest must include separator: {}",
                quoted(text)
            )));
        };

        let algorithm = DigestAlgorithm::from_name(algorithm_name).ok_or_else(|| {
            InvalidDigestError::new(format!(
                "unknown digest algorithm {} in digest {}",
                quoted(algorithm_name),
                quoted(text)
            ))
        })?;

        Self::new(algorithm, hex)
    }

    /// Computes the SHA-256 digest of `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dockhub_core::Digest;
    ///
    /// let digest = Digest::sha256_of(b"");
    /// assert_eq!(
    ///     digest.as_text(),
    ///     "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    /// );
    /// ```
    #[must_use]
    pub fn sha256_of(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self {
            algorithm: DigestAlgorithm::Sha256,
            hex: hex::encode(hasher.finalize()),
        }
    }

    /// Returns the digest algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Returns the normalized hex data.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Formats the digest as `algorithm:hexdata`.
    #[must_use]
    pub fn as_text(&self) -> String {
        format!("{}{DIGEST_SEPARATOR}{}", self.algorithm.name(), self.hex)
    }

    /// Returns true if `data` hashes to this digest.
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        match self.algorithm {
            DigestAlgorithm::Sha256 => Self::sha256_of(data) == *self,
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{DIGEST_SEPARATOR}{}", self.algorithm.name(), self.hex)
    }
}

impl FromStr for Digest {
    type Err = InvalidDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_text(&s).map_err(serde::de::Error::custom)
    }
}
