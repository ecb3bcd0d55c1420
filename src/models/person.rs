//! Person model as returned by the Immich people API.

use crate::domain::BirthDate;
use serde::{Deserialize, Serialize};

/// A recognized face cluster in Immich.
///
/// Only the fields this tool reads are modelled; everything else in the
/// API payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Person {
    /// Opaque person identifier
    pub id: String,

    /// Display name, empty when the face has not been named
    pub name: String,

    /// Birthdate as `YYYY-MM-DD`, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Person {
    /// Create a named person without a birthdate.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// True when the person has a name but nobody has filled in a birthdate.
    pub fn is_missing_birth_date(&self) -> bool {
        let named = !self.name.trim().is_empty();
        let undated = self
            .birth_date
            .as_deref()
            .map_or(true, |date| date.trim().is_empty());
        named && undated
    }
}

/// One page of `GET /api/people`.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PeoplePage {
    /// People on this page
    pub people: Vec<Person>,

    /// Whether another page follows this one
    pub has_next_page: bool,
}

/// Body of `PUT /api/people/{id}` when only the birthdate changes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBirthDateRequest {
    pub birth_date: BirthDate,
}
