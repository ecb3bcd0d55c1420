//! Application service layer.
//!
//! Services hold the batch logic of the two tools and talk to the network only
//! through the repository traits. Per-item problems become outcome values in
//! a report; only errors that abort the whole run are returned as `Err`.

mod directory_service;
mod match_service;

pub use directory_service::{DirectoryService, SkipReason, UpdateOutcome, UpdateReport, PAGE_SIZE};
pub use match_service::{MatchReport, MatchService};

pub use crate::matching::CardOutcome;
