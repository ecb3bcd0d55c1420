//! CardDAV client for reading an address book.
//!
//! The address book is enumerated with a single `PROPFIND` (depth 1) on the
//! user's default collection, then each vCard is downloaded with a plain
//! `GET`. Every request carries HTTP Basic credentials.

pub mod multistatus;
pub mod vcard;

pub use multistatus::parse_hrefs;
pub use vcard::{parse_card, VCardError};

use crate::config::CardDavSettings;
use crate::error::{CardDavError, CardDavResult};
use crate::metrics::{HttpTimer, Metrics};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Request only etags; hrefs come with every response element anyway.
const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<D:propfind xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:carddav">
  <D:prop><D:getetag/></D:prop>
</D:propfind>"#;

/// HTTP client for a CardDAV server.
#[derive(Clone)]
pub struct CardDavClient {
    /// Server base URL; hrefs are resolved against it
    base_url: Url,

    username: String,

    /// Precomputed `Authorization` header value
    authorization: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CardDavClient {
    /// Create a new CardDavClient from resolved settings.
    pub fn new(settings: &CardDavSettings, metrics: Metrics) -> CardDavResult<Self> {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build();

        Ok(Self {
            base_url: parse_url(&settings.url)?,
            username: settings.username.clone(),
            authorization: basic_auth(&settings.username, &settings.password),
            agent: Arc::new(agent),
            metrics,
        })
    }

    /// Create a CardDavClient with default timeouts (useful for testing).
    #[doc(hidden)]
    pub fn with_credentials(base_url: &str, username: &str, password: &str) -> CardDavResult<Self> {
        let settings = CardDavSettings {
            url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            sleep: Duration::ZERO,
            request_timeout: 10,
        };
        Self::new(&settings, Metrics::new())
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// URL of the user's default address book collection.
    pub fn addressbook_url(&self) -> String {
        format!(
            "{}/addressbooks/{}/contacts/",
            self.base_url.as_str().trim_end_matches('/'),
            urlencoding::encode(&self.username)
        )
    }

    /// Resolve an href from a multistatus response to an absolute URL.
    ///
    /// Servers usually answer with absolute paths (`/dav/...`), which replace
    /// any path component of the base URL.
    pub fn resolve_href(&self, href: &str) -> CardDavResult<String> {
        self.base_url
            .join(href)
            .map(String::from)
            .map_err(|e| CardDavError::InvalidUrl {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }

    /// List the hrefs of every member of the address book collection.
    ///
    /// The collection itself is usually part of the answer; callers decide
    /// what to skip.
    pub fn list_card_hrefs(&self) -> CardDavResult<Vec<String>> {
        let url = self.addressbook_url();
        let timer = HttpTimer::start(&self.metrics);
        tracing::debug!("PROPFIND {}", url);

        let result = self
            .agent
            .request("PROPFIND", &url)
            .set("Authorization", &self.authorization)
            .set("Depth", "1")
            .set("Content-Type", "application/xml")
            .send_string(PROPFIND_BODY)
            .map_err(|e| map_error(&url, e));
        timer.finish(result.is_ok());

        let body = result?
            .into_string()
            .map_err(|e| CardDavError::HttpError(e.to_string()))?;

        let hrefs = parse_hrefs(&body)?;
        tracing::debug!(count = hrefs.len(), "Address book listed");
        Ok(hrefs)
    }

    /// Download the body of one address book member.
    pub fn fetch_card(&self, href: &str) -> CardDavResult<String> {
        let url = self.resolve_href(href)?;
        let timer = HttpTimer::start(&self.metrics);
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization)
            .call()
            .map_err(|e| map_error(&url, e));
        timer.finish(result.is_ok());

        let body = result?
            .into_string()
            .map_err(|e| CardDavError::HttpError(e.to_string()))?;
        self.metrics.record_card_fetched();
        Ok(body)
    }
}

fn parse_url(raw: &str) -> CardDavResult<Url> {
    Url::parse(raw).map_err(|e| CardDavError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

fn basic_auth(username: &str, password: &str) -> String {
    let token = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", token)
}

/// Map a ureq error to a CardDavError.
fn map_error(url: &str, error: ureq::Error) -> CardDavError {
    match error {
        ureq::Error::Status(status, response) => CardDavError::ApiError {
            status,
            url: url.to_string(),
            message: response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string()),
        },
        ureq::Error::Transport(transport) => CardDavError::HttpError(transport.to_string()),
    }
}
