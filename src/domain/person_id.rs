//! PersonId value object.

use super::errors::ValidationError;
use std::fmt;

/// Identifier of an Immich person, as it appears in the update path.
///
/// The ID is opaque; surrounding whitespace from hand-edited tables is
/// dropped and a blank ID is rejected.
///
/// ```
/// use immich_birthday_sync::domain::PersonId;
///
/// let id = PersonId::new(" 0b5c2c4e-6f1a-4d0e-9d4b-7b1f1c7e2a11").unwrap();
/// assert_eq!(id.as_str(), "0b5c2c4e-6f1a-4d0e-9d4b-7b1f1c7e2a11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: &str) -> Result<Self, ValidationError> {
        match id.trim() {
            "" => Err(ValidationError::EmptyId),
            trimmed => Ok(Self(trimmed.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
