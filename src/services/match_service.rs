//! Match service: fill table rows with birthdays from an address book.

use crate::carddav::parse_card;
use crate::error::CardDavResult;
use crate::matching::{CardOutcome, RowMatcher};
use crate::models::TableRow;
use crate::repositories::ContactSource;
use std::thread;
use std::time::Duration;

/// Outcome of a matching pass.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// Rows that received a birthdate, in resource order
    pub matched: Vec<TableRow>,

    /// Rows that found no usable card
    pub unmatched: Vec<TableRow>,

    /// What happened to each fetched resource
    pub outcomes: Vec<(String, CardOutcome)>,
}

impl MatchReport {
    pub fn unparseable(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, CardOutcome::Unparseable(_)))
            .count()
    }
}

/// Cross-references table rows with an address book.
pub struct MatchService<S> {
    source: S,
    delay: Duration,
}

impl<S: ContactSource> MatchService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            delay: Duration::ZERO,
        }
    }

    /// Pause for `delay` after every resource fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// List the address book members worth fetching.
    ///
    /// Collection hrefs (ending in `/`), such as the address book itself,
    /// are left out.
    pub fn list_contact_resources(&self) -> CardDavResult<Vec<String>> {
        let hrefs = self.source.list_resources()?;
        Ok(hrefs
            .into_iter()
            .filter(|href| !href.ends_with('/'))
            .collect())
    }

    /// Fetch every resource and hand birthdays to the first matching row.
    ///
    /// Resources that are not vCards are skipped. A failed fetch aborts the
    /// pass. Only rows that received a normalized birthdate end up in
    /// [`MatchReport::matched`].
    pub fn match_and_normalize(
        &self,
        rows: Vec<TableRow>,
        resources: &[String],
    ) -> CardDavResult<MatchReport> {
        let mut matcher = RowMatcher::new(rows);
        let mut report = MatchReport::default();

        for href in resources {
            let body = self.source.fetch_resource(href)?;

            let outcome = match parse_card(&body) {
                Ok(card) => matcher.match_card(&card),
                Err(err) => CardOutcome::Unparseable(err.to_string()),
            };

            match &outcome {
                CardOutcome::Matched(row) => {
                    tracing::debug!(href = %href, id = %row.id, birth_date = %row.birth_date, "Matched")
                }
                CardOutcome::UnsupportedBirthday { row_id, raw } => {
                    tracing::warn!(href = %href, id = %row_id, "Unsupported birthday '{}'", raw)
                }
                CardOutcome::Unparseable(reason) => {
                    tracing::debug!(href = %href, "Skipping resource: {}", reason)
                }
                _ => {}
            }

            if let CardOutcome::Matched(row) = &outcome {
                report.matched.push(row.clone());
            }
            report.outcomes.push((href.clone(), outcome));

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        report.unmatched = matcher.pending().cloned().collect();
        tracing::info!(
            resources = resources.len(),
            matched = report.matched.len(),
            unmatched = report.unmatched.len(),
            unparseable = report.unparseable(),
            "Matching finished"
        );
        Ok(report)
    }
}
