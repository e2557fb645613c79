//! Admin-facing connection tests for the configured integrations.
//!
//! Each test is a single outbound HTTP request with a short timeout and no
//! retry. Raw error text is surfaced to the admin UI; transient and
//! permanent failures are not distinguished.

use std::time::Duration;

use serde::Serialize;

/// Timeout for a single connection probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// IntegrationKind
// ---------------------------------------------------------------------------

/// The integrations an admin can test, keyed by URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationKind {
    HaloPsa,
    QuoteIt,
    Hudu,
    QuickBooks,
}

impl IntegrationKind {
    /// Parse the path slug used by the admin API.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "halopsa" => Some(IntegrationKind::HaloPsa),
            "quoteit" => Some(IntegrationKind::QuoteIt),
            "hudu" => Some(IntegrationKind::Hudu),
            "quickbooks" => Some(IntegrationKind::QuickBooks),
            _ => None,
        }
    }

    pub fn as_slug(self) -> &'static str {
        match self {
            IntegrationKind::HaloPsa => "halopsa",
            IntegrationKind::QuoteIt => "quoteit",
            IntegrationKind::Hudu => "hudu",
            IntegrationKind::QuickBooks => "quickbooks",
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionTestResult
// ---------------------------------------------------------------------------

/// Outcome of a connection probe, serialized straight to the admin client.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionTestResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionTestResult {
    fn ok(status: u16) -> Self {
        Self {
            ok: true,
            status: Some(status),
            error: None,
        }
    }

    fn failed(status: Option<u16>, error: String) -> Self {
        Self {
            ok: false,
            status,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// Probe an integration endpoint with an authenticated GET.
///
/// `base_url` must be configured; `api_key`, when present, is sent as a
/// bearer token. Any 2xx response counts as reachable. Errors carry the raw
/// reqwest error text per the admin-test contract.
pub async fn probe(base_url: Option<&str>, api_key: Option<&str>) -> ConnectionTestResult {
    let Some(url) = base_url.filter(|u| !u.is_empty()) else {
        return ConnectionTestResult::failed(None, "base URL is not configured".to_string());
    };

    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return ConnectionTestResult::failed(None, e.to_string()),
    };

    let mut request = client.get(url);
    if let Some(key) = api_key.filter(|k| !k.is_empty()) {
        request = request.bearer_auth(key);
    }

    match request.send().await {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                ConnectionTestResult::ok(status.as_u16())
            } else {
                ConnectionTestResult::failed(
                    Some(status.as_u16()),
                    format!("unexpected status: {status}"),
                )
            }
        }
        Err(e) => ConnectionTestResult::failed(None, e.to_string()),
    }
}
