//! Contact card model: the two vCard properties the matcher cares about.

/// The parts of a vCard used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactCard {
    /// `FN` property, unescaped
    pub full_name: Option<String>,

    /// Raw `BDAY` value, before normalization
    pub birthday: Option<String>,
}

impl ContactCard {
    pub fn new(full_name: Option<String>, birthday: Option<String>) -> Self {
        Self {
            full_name,
            birthday,
        }
    }
}
