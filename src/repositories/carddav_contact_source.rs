use crate::carddav::CardDavClient;
use crate::error::CardDavResult;
use crate::repositories::traits::ContactSource;

/// Contact source backed by a CardDAV address book.
impl ContactSource for CardDavClient {
    fn list_resources(&self) -> CardDavResult<Vec<String>> {
        self.list_card_hrefs()
    }

    fn fetch_resource(&self, href: &str) -> CardDavResult<String> {
        self.fetch_card(href)
    }
}
