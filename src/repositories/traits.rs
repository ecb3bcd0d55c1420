use crate::domain::{BirthDate, PersonId};
use crate::error::{CardDavResult, ImmichApiResult};
use crate::models::PeoplePage;

/// Access to the photo service's people directory.
pub trait PeopleRepository {
    /// Retrieve one page of people. Pages are numbered from 1.
    fn list_page(&self, page: usize, size: usize) -> ImmichApiResult<PeoplePage>;

    /// Replace the birthdate of one person.
    fn update_birth_date(&self, id: &PersonId, birth_date: BirthDate) -> ImmichApiResult<()>;
}

/// Read-only access to an address book.
pub trait ContactSource {
    /// List references to every resource in the address book.
    fn list_resources(&self) -> CardDavResult<Vec<String>>;

    /// Fetch the body of one resource by reference.
    fn fetch_resource(&self, href: &str) -> CardDavResult<String>;
}
