//! HTTP client for the Immich people API.
//!
//! This module provides a synchronous HTTP client built on `ureq`. It handles
//! authentication, error mapping and the two people endpoints the tools need:
//! the paged listing and the per-person update.

use crate::config::ImmichSettings;
use crate::domain::{BirthDate, PersonId};
use crate::error::{ImmichApiError, ImmichApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{PeoplePage, UpdateBirthDateRequest};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the Immich people API.
#[derive(Clone)]
pub struct ImmichClient {
    /// Base URL of the Immich server, without `/api`
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ImmichClient {
    /// Create a new ImmichClient from resolved settings.
    pub fn new(settings: &ImmichSettings, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.request_timeout))
            .build();

        Self {
            base_url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an ImmichClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full API URL from a path below `/api`.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/api/{}", base, path)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> ImmichApiResult<ureq::Response> {
        let timer = HttpTimer::start(&self.metrics);
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .set("x-api-key", &self.api_key)
            .call()
            .map_err(|e| self.map_error(e));

        timer.finish(result.is_ok());
        result
    }

    /// Execute a PUT request with authentication and JSON body.
    fn put(&self, path: &str, body: &serde_json::Value) -> ImmichApiResult<ureq::Response> {
        let timer = HttpTimer::start(&self.metrics);
        let url = self.build_url(path);
        tracing::debug!("PUT {} {}", url, body);

        let result = self
            .agent
            .put(&url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .set("x-api-key", &self.api_key)
            .send_json(body)
            .map_err(|e| self.map_error(e));

        timer.finish(result.is_ok());
        result
    }

    /// Map a ureq error to an ImmichApiError.
    fn map_error(&self, error: ureq::Error) -> ImmichApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => ImmichApiError::Unauthorized(message),
                    404 => ImmichApiError::NotFound(message),
                    _ => ImmichApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ImmichApiError::HttpError("Connection failed".to_string())
                } else if is_timeout(&transport) {
                    ImmichApiError::Timeout
                } else {
                    ImmichApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Get one page of people, hidden people excluded.
    ///
    /// Pages are numbered from 1.
    pub fn get_people_page(&self, page: usize, size: usize) -> ImmichApiResult<PeoplePage> {
        let path = format!("/people?withHidden=false&page={}&size={}", page, size);
        let response = self.get(&path)?;
        let body = response
            .into_string()
            .map_err(|e| ImmichApiError::HttpError(e.to_string()))?;

        let page: PeoplePage = serde_json::from_str(&body)?;
        self.metrics.record_people_listed(page.people.len());
        Ok(page)
    }

    /// Replace the birthdate of one person.
    ///
    /// Only `200 OK` counts as success; any other status comes back as
    /// `ImmichApiError::ApiError` carrying the response body.
    pub fn update_birth_date(&self, id: &PersonId, birth_date: BirthDate) -> ImmichApiResult<()> {
        let request = UpdateBirthDateRequest { birth_date };
        let body = serde_json::to_value(&request)?;

        let path = format!("/people/{}", urlencoding::encode(id.as_str()));
        let response = self.put(&path, &body)?;

        let status = response.status();
        if status != 200 {
            let message = response.into_string().unwrap_or_default();
            return Err(ImmichApiError::ApiError { status, message });
        }
        Ok(())
    }
}

/// Only an I/O error of kind `TimedOut` (or `WouldBlock`, which some
/// platforms report for read timeouts) is a timeout.
fn is_timeout(transport: &ureq::Transport) -> bool {
    transport.kind() == ureq::ErrorKind::Io
        && std::error::Error::source(transport)
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|err| {
                matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = ImmichClient::with_base_url(
            "http://nas.local:2283".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client.build_url("/people"),
            "http://nas.local:2283/api/people"
        );
        assert_eq!(client.build_url("people"), "http://nas.local:2283/api/people");

        let client_with_slash = ImmichClient::with_base_url(
            "http://nas.local:2283/".to_string(),
            "test-key".to_string(),
        );
        assert_eq!(
            client_with_slash.build_url("/people/abc"),
            "http://nas.local:2283/api/people/abc"
        );
    }

    #[test]
    fn test_client_creation() {
        let settings = ImmichSettings {
            url: "https://photos.example.com".to_string(),
            api_key: "test-key-123".to_string(),
            request_timeout: 30,
        };

        let client = ImmichClient::new(&settings, Metrics::new());
        assert_eq!(client.base_url, "https://photos.example.com");
        assert_eq!(client.api_key, "test-key-123");
    }
}
