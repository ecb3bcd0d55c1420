//! First-match-wins assignment of contact cards to table rows.

use super::name::{normalize_contact_name, normalize_row_name};
use crate::domain::BirthDate;
use crate::models::{ContactCard, TableRow};

/// What happened to one address book resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    /// A row was matched and received this birthdate.
    Matched(TableRow),

    /// No remaining row carries this contact's name, or the card has no name.
    Unmatched,

    /// A row has this name but the card has no birthday.
    NoBirthday { row_id: String },

    /// A row has this name but the birthday could not be normalized.
    UnsupportedBirthday { row_id: String, raw: String },

    /// The resource body was not a vCard.
    Unparseable(String),
}

/// Rows still waiting for a birthdate, in input order.
///
/// Each card is compared against the remaining rows and the first row whose
/// name matches wins; there is no scoring across candidates. A row leaves the
/// pool once it receives a birthdate, so it is emitted at most once.
#[derive(Debug, Clone, Default)]
pub struct RowMatcher {
    pending: Vec<(String, TableRow)>,
}

impl RowMatcher {
    pub fn new(rows: Vec<TableRow>) -> Self {
        let pending = rows
            .into_iter()
            .map(|row| (normalize_row_name(&row.name), row))
            .collect();
        Self { pending }
    }

    /// Try to place `card` on the first pending row with the same name.
    pub fn match_card(&mut self, card: &ContactCard) -> CardOutcome {
        let Some(full_name) = card.full_name.as_deref() else {
            return CardOutcome::Unmatched;
        };
        let key = normalize_contact_name(full_name);

        let Some(index) = self.pending.iter().position(|(name, _)| *name == key) else {
            return CardOutcome::Unmatched;
        };
        let row_id = self.pending[index].1.id.clone();

        let Some(raw) = card.birthday.as_deref() else {
            return CardOutcome::NoBirthday { row_id };
        };

        match BirthDate::normalize(raw) {
            Some(birth_date) => {
                let (_, row) = self.pending.remove(index);
                CardOutcome::Matched(row.with_birth_date(birth_date))
            }
            None => CardOutcome::UnsupportedBirthday {
                row_id,
                raw: raw.to_string(),
            },
        }
    }

    /// Rows that have not been matched yet.
    pub fn pending(&self) -> impl Iterator<Item = &TableRow> {
        self.pending.iter().map(|(_, row)| row)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
