//! Name normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parenthetical group and the whitespace in front of it.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)").expect("parenthetical pattern is valid"));

/// Normalize a display name coming from the interchange table.
pub fn normalize_row_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a vCard `FN` value: trim, lowercase, drop `(nickname)` groups.
pub fn normalize_contact_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    PARENTHETICAL.replace_all(&lowered, "").trim().to_string()
}
