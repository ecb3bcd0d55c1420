//! Directory service: people without birthdates out, edited birthdates back in.

use crate::domain::{BirthDate, PersonId, ValidationError};
use crate::error::ImmichApiResult;
use crate::models::{Person, TableRow};
use crate::repositories::PeopleRepository;

/// Page size used when listing people.
pub const PAGE_SIZE: usize = 1000;

/// Why a row was not sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The birthdate cell is empty.
    NoBirthDate,

    /// The id cell is empty.
    MissingId,

    /// The birthdate cell failed validation.
    Invalid(ValidationError),
}

/// Result of applying one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(BirthDate),
    Skipped(SkipReason),
    Failed { status: Option<u16>, message: String },
}

/// Per-row outcomes of an update run, in input order.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    pub outcomes: Vec<(TableRow, UpdateOutcome)>,
}

impl UpdateReport {
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, UpdateOutcome::Updated(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, UpdateOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UpdateOutcome::Failed { .. }))
    }

    fn count<F: Fn(&UpdateOutcome) -> bool>(&self, pred: F) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Bridges the people API and the interchange table.
pub struct DirectoryService<R> {
    repo: R,
    page_size: usize,
}

impl<R: PeopleRepository> DirectoryService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            page_size: PAGE_SIZE,
        }
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Collect every named person without a birthdate.
    ///
    /// Pages are requested from 1 until the server reports no next page. Any
    /// failed page aborts the whole listing.
    pub fn fetch_missing_birthdates(&self) -> ImmichApiResult<Vec<Person>> {
        let mut missing = Vec::new();
        let mut page = 1;

        loop {
            let response = self.repo.list_page(page, self.page_size)?;
            let before = missing.len();
            missing.extend(
                response
                    .people
                    .into_iter()
                    .filter(Person::is_missing_birth_date),
            );
            tracing::debug!(page, found = missing.len() - before, "People page processed");

            if !response.has_next_page {
                break;
            }
            page += 1;
        }

        tracing::info!(count = missing.len(), "People without a birthdate");
        Ok(missing)
    }

    /// Push the birthdates from `rows`, one request per row.
    ///
    /// Rows are independent: an invalid date or a failed request is recorded
    /// and processing moves on to the next row. Successes are logged unless
    /// `silent` is set; problems are always logged.
    pub fn apply_birthdate_updates(&self, rows: &[TableRow], silent: bool) -> UpdateReport {
        let mut report = UpdateReport::default();

        for row in rows {
            let outcome = self.apply_row(row);
            match &outcome {
                UpdateOutcome::Updated(date) if !silent => {
                    tracing::info!("✔ Updated {} ({}) with birthDate={}", row.name, row.id, date);
                }
                UpdateOutcome::Skipped(SkipReason::Invalid(err)) => {
                    tracing::warn!("⚠ Skipping {} ({}): {}", row.name, row.id, err);
                }
                UpdateOutcome::Skipped(SkipReason::MissingId) => {
                    tracing::warn!("⚠ Skipping {}: no id", row.name);
                }
                UpdateOutcome::Failed { status, message } => {
                    let status = status.map_or_else(|| "-".to_string(), |s| s.to_string());
                    tracing::error!("✖ Failed to update {} ({}): {} {}", row.name, row.id, status, message);
                }
                _ => {}
            }
            report.outcomes.push((row.clone(), outcome));
        }

        tracing::info!(
            updated = report.updated(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Update run finished"
        );
        report
    }

    fn apply_row(&self, row: &TableRow) -> UpdateOutcome {
        if !row.has_birth_date() {
            return UpdateOutcome::Skipped(SkipReason::NoBirthDate);
        }

        let Ok(id) = PersonId::new(row.id.as_str()) else {
            return UpdateOutcome::Skipped(SkipReason::MissingId);
        };

        let birth_date = match BirthDate::parse_strict(&row.birth_date) {
            Ok(date) => date,
            Err(err) => return UpdateOutcome::Skipped(SkipReason::Invalid(err)),
        };

        match self.repo.update_birth_date(&id, birth_date) {
            Ok(()) => UpdateOutcome::Updated(birth_date),
            Err(err) => UpdateOutcome::Failed {
                status: err.status(),
                message: err.detail(),
            },
        }
    }
}
