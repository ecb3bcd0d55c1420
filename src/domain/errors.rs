//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided birthdate is not a `YYYY-MM-DD` calendar date.
    InvalidBirthDate(String),

    /// The birthdate parses but carries a placeholder year.
    SentinelYear(i32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidBirthDate(raw) => write!(f, "invalid birthdate '{}'", raw),
            Self::SentinelYear(year) => {
                write!(f, "year {} is a placeholder for an unknown year", year)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
