//! Domain value objects and types.
//!
//! These value objects validate at construction time so that nothing malformed
//! can reach the interchange table or the Immich update endpoint.

pub mod birth_date;
pub mod errors;
pub mod person_id;

pub use birth_date::{BirthDate, MIN_BIRTH_YEAR};
pub use errors::ValidationError;
pub use person_id::PersonId;
