//! One row of the `id;name;birthDate` interchange table.

use super::Person;
use crate::domain::BirthDate;

/// A row of the interchange table.
///
/// Cells are kept as text: the birthdate column may be empty (a placeholder
/// waiting to be filled) or hold something a human typed that still has to
/// pass [`BirthDate::parse_strict`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub birth_date: String,
}

impl TableRow {
    /// Column names, in order.
    pub const HEADER: [&'static str; 3] = ["id", "name", "birthDate"];

    pub fn new(id: impl Into<String>, name: impl Into<String>, birth_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Build a row from raw fields, trimming each cell.
    ///
    /// Returns `None` when fewer than three fields are present. Extra fields
    /// beyond the third are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter().map(str::trim);
        let id = fields.next()?;
        let name = fields.next()?;
        let birth_date = fields.next()?;
        Some(Self::new(id, name, birth_date))
    }

    /// A placeholder row for a person whose birthdate is still unknown.
    pub fn placeholder(person: &Person) -> Self {
        Self::new(person.id.as_str(), person.name.as_str(), "")
    }

    /// This row with a validated birthdate filled in.
    pub fn with_birth_date(&self, birth_date: BirthDate) -> Self {
        Self::new(self.id.as_str(), self.name.as_str(), birth_date.to_string())
    }

    pub fn has_birth_date(&self) -> bool {
        !self.birth_date.is_empty()
    }

    /// Cells in header order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.id, &self.name, &self.birth_date]
    }
}
