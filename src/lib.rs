//! Immich Birthday Sync - fill in missing birthdates for Immich people.
//!
//! Two command-line tools share this library and a semicolon-delimited
//! `id;name;birthDate` table:
//!
//! - `immich-birthdays` lists named people without a birthdate and pushes
//!   edited birthdates back to Immich.
//! - `carddav-birthdays` looks those people up in a CardDAV address book and
//!   writes a table of the birthdates it found.
//!
//! # Architecture
//!
//! - **config**: settings from `immich.toml`, environment and command line
//! - **error**: error types for each remote and local concern
//! - **domain**: validated value objects (`PersonId`, `BirthDate`)
//! - **models**: API payloads, table rows and contact cards
//! - **table**: interchange table reader and writer
//! - **client**: Immich people API client
//! - **carddav**: CardDAV client, multistatus and vCard parsing
//! - **matching**: name normalization and row matching
//! - **repositories**: traits the services use to reach the network
//! - **services**: the batch operations of both tools

pub mod carddav;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;
pub mod table;

pub use carddav::CardDavClient;
pub use client::ImmichClient;
pub use config::{CardDavOverrides, CardDavSettings, Config, ImmichSettings};
pub use domain::{BirthDate, PersonId, ValidationError};
pub use error::{CardDavError, ConfigError, ImmichApiError, TableError};
pub use matching::{normalize_contact_name, normalize_row_name, CardOutcome, RowMatcher};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ContactCard, PeoplePage, Person, TableRow};
pub use repositories::{ContactSource, PeopleRepository};
pub use services::{
    DirectoryService, MatchReport, MatchService, SkipReason, UpdateOutcome, UpdateReport,
};
