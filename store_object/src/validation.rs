//! Validation module
//!
//! Field names reach generated SQL as identifiers, so every name used in a
//! filter, sort or projection is checked here first.

use std::fmt;
use thiserror::Error;

/// Why a name was rejected as a SQL identifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid characters in field name '{0}': only ASCII letters, digits and underscores")]
    InvalidCharacters(String),

    #[error("field name '{name}' has {length} characters, the limit is {max_length}")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("field name is empty")]
    Empty,

    #[error("field name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),
}

/// A validated field name that is safe to use in SQL queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    /// PostgreSQL identifier length limit
    const MAX_LENGTH: usize = 63;

    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Self::validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name double-quoted for interpolation into SQL
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }

    fn validate_identifier(name: &str) -> Result<(), ValidationError> {
        let first = name.chars().next().ok_or(ValidationError::Empty)?;

        if name.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
                max_length: Self::MAX_LENGTH,
            });
        }

        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        Ok(())
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
