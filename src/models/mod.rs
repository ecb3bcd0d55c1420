//! Data models for the Immich people API, the interchange table and vCards.

pub mod contact_card;
pub mod person;
pub mod table_row;

pub use contact_card::ContactCard;
pub use person::{PeoplePage, Person, UpdateBirthDateRequest};
pub use table_row::TableRow;
