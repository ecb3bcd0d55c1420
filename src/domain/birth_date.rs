//! BirthDate value object.
//!
//! Two ways in: [`BirthDate::parse_strict`] for dates typed into the
//! interchange table, and [`BirthDate::normalize`] for the looser encodings
//! found in vCard `BDAY` properties. Both refuse years before
//! [`MIN_BIRTH_YEAR`], which some address books store when the real year is
//! unknown (Apple writes 1604 together with `X-APPLE-OMIT-YEAR`).

use super::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Earliest year accepted as a real birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Accepted vCard encodings, tried in order.
const VCARD_FORMATS: [&str; 2] = ["%Y%m%d", ISO_FORMAT];

/// A calendar birthdate with a plausible year.
///
/// Always displayed and serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a date that must already be in `YYYY-MM-DD` form.
    ///
    /// The value is parsed as a calendar date, so `2023-02-30` is rejected,
    /// and must round-trip exactly, so `2024-1-5` is rejected as well.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBirthDate` for anything that is not an
    /// exact ISO date and `ValidationError::SentinelYear` for years before 1900.
    pub fn parse_strict(raw: &str) -> Result<Self, ValidationError> {
        let date = NaiveDate::parse_from_str(raw, ISO_FORMAT)
            .map_err(|_| ValidationError::InvalidBirthDate(raw.to_string()))?;

        if date.format(ISO_FORMAT).to_string() != raw {
            return Err(ValidationError::InvalidBirthDate(raw.to_string()));
        }

        Self::from_date(date)
    }

    /// Normalize a free-form birthday value to a `BirthDate`.
    ///
    /// Accepts `YYYYMMDD` and `YYYY-MM-DD` after trimming. Returns `None` for
    /// unsupported formats and for placeholder years.
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        VCARD_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .and_then(|date| Self::from_date(date).ok())
    }

    /// Wrap a parsed date, applying the placeholder-year rule.
    pub fn from_date(date: NaiveDate) -> Result<Self, ValidationError> {
        if date.year() < MIN_BIRTH_YEAR {
            return Err(ValidationError::SentinelYear(date.year()));
        }
        Ok(Self(date))
    }

    /// The underlying calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl Serialize for BirthDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Normalize a raw birthday string straight to its `YYYY-MM-DD` text.
pub fn normalize_birthdate(raw: &str) -> Option<String> {
    BirthDate::normalize(raw).map(|date| date.to_string())
}
