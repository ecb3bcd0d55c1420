use crate::client::ImmichClient;
use crate::domain::{BirthDate, PersonId};
use crate::error::ImmichApiResult;
use crate::models::PeoplePage;
use crate::repositories::traits::PeopleRepository;

/// People repository backed by the Immich HTTP API.
impl PeopleRepository for ImmichClient {
    fn list_page(&self, page: usize, size: usize) -> ImmichApiResult<PeoplePage> {
        self.get_people_page(page, size)
    }

    fn update_birth_date(&self, id: &PersonId, birth_date: BirthDate) -> ImmichApiResult<()> {
        ImmichClient::update_birth_date(self, id, birth_date)
    }
}
