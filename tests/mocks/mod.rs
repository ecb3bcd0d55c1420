//! In-memory repository implementations for service tests.

#![allow(dead_code)]

use immich_birthday_sync::domain::{BirthDate, PersonId};
use immich_birthday_sync::error::{CardDavError, CardDavResult, ImmichApiError, ImmichApiResult};
use immich_birthday_sync::models::{PeoplePage, Person};
use immich_birthday_sync::repositories::{ContactSource, PeopleRepository};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Mock people repository.
///
/// Serves a fixed list of pages and records every call, so tests can check
/// which pages were requested and which updates were attempted.
#[derive(Default)]
pub struct MockPeopleRepository {
    pages: Vec<Vec<Person>>,
    failing_page: Option<usize>,
    failing_ids: HashSet<String>,
    pub requested_pages: RefCell<Vec<(usize, usize)>>,
    pub updates: RefCell<Vec<(String, String)>>,
}

impl MockPeopleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page. Every page but the last reports a next page.
    pub fn with_page(mut self, people: Vec<Person>) -> Self {
        self.pages.push(people);
        self
    }

    pub fn failing_on_page(mut self, page: usize) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn failing_update_for(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }
}

impl PeopleRepository for MockPeopleRepository {
    fn list_page(&self, page: usize, size: usize) -> ImmichApiResult<PeoplePage> {
        self.requested_pages.borrow_mut().push((page, size));

        if self.failing_page == Some(page) {
            return Err(ImmichApiError::ApiError {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        let people = self.pages.get(page - 1).cloned().unwrap_or_default();
        Ok(PeoplePage {
            people,
            has_next_page: page < self.pages.len(),
            ..Default::default()
        })
    }

    fn update_birth_date(&self, id: &PersonId, birth_date: BirthDate) -> ImmichApiResult<()> {
        self.updates
            .borrow_mut()
            .push((id.to_string(), birth_date.to_string()));

        if self.failing_ids.contains(id.as_str()) {
            return Err(ImmichApiError::ApiError {
                status: 400,
                message: r#"{"message":"Invalid birthDate"}"#.to_string(),
            });
        }
        Ok(())
    }
}

/// Mock address book holding vCard bodies keyed by href.
#[derive(Default)]
pub struct MockContactSource {
    hrefs: Vec<String>,
    bodies: HashMap<String, String>,
    pub fetched: RefCell<Vec<String>>,
}

impl MockContactSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, href: &str, body: &str) -> Self {
        self.hrefs.push(href.to_string());
        self.bodies.insert(href.to_string(), body.to_string());
        self
    }

    /// An href that is listed but answers 404 when fetched.
    pub fn with_missing_resource(mut self, href: &str) -> Self {
        self.hrefs.push(href.to_string());
        self
    }
}

impl ContactSource for MockContactSource {
    fn list_resources(&self) -> CardDavResult<Vec<String>> {
        Ok(self.hrefs.clone())
    }

    fn fetch_resource(&self, href: &str) -> CardDavResult<String> {
        self.fetched.borrow_mut().push(href.to_string());
        self.bodies
            .get(href)
            .cloned()
            .ok_or_else(|| CardDavError::ApiError {
                status: 404,
                url: href.to_string(),
                message: "Not Found".to_string(),
            })
    }
}

/// Build a minimal vCard.
pub fn vcard(full_name: &str, bday: Option<&str>) -> String {
    let mut card = format!("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:{}\r\n", full_name);
    if let Some(bday) = bday {
        card.push_str(&format!("BDAY:{}\r\n", bday));
    }
    card.push_str("END:VCARD\r\n");
    card
}

pub fn named(id: &str, name: &str) -> Person {
    Person::new(id, name)
}

pub fn dated(id: &str, name: &str, birth_date: &str) -> Person {
    Person {
        birth_date: Some(birth_date.to_string()),
        ..Person::new(id, name)
    }
}
