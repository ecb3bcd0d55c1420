//! Name matching between address book contacts and table rows.
//!
//! Matching is exact equality on normalized names. Contact names get an extra
//! step that drops parenthetical nicknames, so `William Turner (Bill)` in the
//! address book matches `William Turner` in Immich.

pub mod name;
pub mod row_matcher;

pub use name::{normalize_contact_name, normalize_row_name};
pub use row_matcher::{CardOutcome, RowMatcher};
