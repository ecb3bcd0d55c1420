//! Logging setup shared by both binaries.
//!
//! All diagnostics go to stderr; stdout is reserved for table output so the
//! tools can be piped into each other.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to this crate
/// and everything else logs errors only.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn default_filter(level: &str) -> String {
    format!("error,immich_birthday_sync={level},immich_birthdays={level},carddav_birthdays={level}")
}
