//! Repository name grammar.
//!
//! A repository name is a sequence of path components separated by `/`, for
//! example `library/ubuntu`. Each component matches
//! `[a-z0-9]+(?:[._-][a-z0-9]+)*` and is at most
//! [`MAX_COMPONENT_LENGTH`] characters long; the whole name is at most
//! [`MAX_NAME_LENGTH`] characters long.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{quoted, InvalidNameError};

/// Characters that may start, end and appear anywhere in a path component.
pub const COMPONENT_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Characters that may separate runs of [`COMPONENT_CHARACTERS`].
pub const COMPONENT_SEPARATORS: &str = ".-_";

/// Maximum length of a single path component, in characters.
pub const MAX_COMPONENT_LENGTH: usize = 30;

/// Separator between path components.
pub const NAME_SEPARATOR: char = '/';

/// Maximum length of a repository name, in characters.
pub const MAX_NAME_LENGTH: usize = 256;

const fn is_component_character(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

const fn is_component_separator(c: char) -> bool {
    matches!(c, '.' | '-' | '_')
}

/// Splits a repository name into its path components.
///
/// Empty components are passed through so that [`validate_component`] can
/// reject them.
///
/// # Errors
///
/// Returns an error if `name` is empty.
///
/// # Examples
///
/// ```
/// use dockhub_core::name::split_components;
///
/// assert_eq!(split_components("library/ubuntu").unwrap(), vec!["library", "ubuntu"]);
/// assert_eq!(split_components("a//b").unwrap(), vec!["a", "", "b"]);
/// assert!(split_components("").is_err());
/// ```
pub fn split_components(name: &str) -> Result<Vec<&str>, InvalidNameError> {
    if name.is_empty() {
        return Err(InvalidNameError::new("repository name may not be empty"));
    }
    Ok(name.split(NAME_SEPARATOR).collect())
}

/// Validates a single repository name path component.
///
/// # Errors
///
/// Returns an error naming the first violated rule: empty, too long, bad
/// leading or trailing character, character outside the alphabet, or two
/// separator characters in a row.
pub fn validate_component(component: &str) -> Result<(), InvalidNameError> {
    let (Some(first), Some(last)) = (component.chars().next(), component.chars().last()) else {
        return Err(InvalidNameError::new(
            "repository name path component may not be empty",
        ));
    };

    if component.chars().count() > MAX_COMPONENT_LENGTH {
        return Err(InvalidNameError::new(format!(
            "repository name path component may not exceed \
             {MAX_COMPONENT_LENGTH} characters"
        )));
    }

    if !is_component_character(first) {
        return Err(InvalidNameError::new(format!(
            "repository name path component must start with a \
             lowercase alphanumeric character: {}",
            quoted(component)
        )));
    }

    if !is_component_character(last) {
        return Err(InvalidNameError::new(format!(
            "repository name path component must end with a \
             lowercase alphanumeric character: {}",
            quoted(component)
        )));
    }

    if !component
        .chars()
        .all(|c| is_component_character(c) || is_component_separator(c))
    {
        return Err(InvalidNameError::new(format!(
            "repository name path component may only contain \
             lowercase alphanumeric characters and {}: {}",
            quoted(COMPONENT_SEPARATORS),
            quoted(component)
        )));
    }

    // Offsets of every separator, regardless of which separator it is.
    let offsets: Vec<usize> = component
        .char_indices()
        .filter(|&(_, c)| is_component_separator(c))
        .map(|(i, _)| i)
        .collect();
    if offsets.windows(2).any(|pair| pair[1] - pair[0] == 1) {
        return Err(InvalidNameError::new(format!(
            "repository name path component may not contain more \
             than one component separator characters \
             ({COMPONENT_SEPARATORS}) in a row: {}",
            quoted(component)
        )));
    }

    Ok(())
}

/// Validates a full repository name.
///
/// The empty and length checks run before the name is split.
///
/// # Errors
///
/// Returns an error if the name is empty, too long, or any of its path
/// components is invalid.
///
/// # Examples
///
/// ```
/// use dockhub_core::name::validate_name;
///
/// assert!(validate_name("library/ubuntu").is_ok());
/// assert!(validate_name("Library/ubuntu").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<(), InvalidNameError> {
    if name.is_empty() {
        return Err(InvalidNameError::new("repository name may not be empty"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(InvalidNameError::new(format!(
            "repository name may not exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    split_components(name)?
        .into_iter()
        .try_for_each(validate_component)
}

/// A validated repository name.
///
/// Construction validates the name; the value is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Creates a repository name after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the name does not satisfy the grammar.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidNameError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns an iterator over the path components of the name.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(NAME_SEPARATOR)
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RepositoryName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RepositoryName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RepositoryName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepositoryName> for String {
    fn from(name: RepositoryName) -> Self {
        name.0
    }
}

impl AsRef<str> for RepositoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
