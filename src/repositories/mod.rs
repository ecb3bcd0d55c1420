//! Repository traits at the network seam.
//!
//! The services only talk to these traits, so they can be exercised against
//! in-memory mocks as well as the real HTTP clients.

pub mod carddav_contact_source;
pub mod immich_people_repository;
pub mod traits;

pub use traits::{ContactSource, PeopleRepository};
