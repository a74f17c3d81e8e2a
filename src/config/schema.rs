//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::health::Endpoint;

/// Root configuration for a health check run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum probes in flight. Unbounded when absent.
    pub max_concurrency: Option<usize>,

    /// HTTP client settings.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Endpoints to check. The built-in defaults are used when empty.
    pub endpoints: Vec<EndpointConfig>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_concurrency: None,
            http: HttpConfig::default(),
            observability: ObservabilityConfig::default(),
            endpoints: Vec::new(),
        }
    }
}

impl CheckerConfig {
    /// Per-probe timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoints to probe, falling back to the defaults when none are configured.
    pub fn resolved_endpoints(&self) -> Vec<Endpoint> {
        if self.endpoints.is_empty() {
            default_endpoints()
        } else {
            self.endpoints.iter().map(Endpoint::from).collect()
        }
    }
}

/// HTTP client settings shared by every probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with each probe.
    pub user_agent: String,

    /// Redirects to follow before giving up. Zero disables following.
    pub max_redirects: usize,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("healthcheck/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 10,
            system_proxy: true,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// A configured endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Display label.
    pub name: String,

    /// Address to probe.
    pub url: String,
}

impl From<&EndpointConfig> for Endpoint {
    fn from(config: &EndpointConfig) -> Self {
        Endpoint::new(config.name.clone(), config.url.clone())
    }
}

/// Endpoints checked when nothing else is configured.
pub fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("Github API", "https://api.github.com"),
        Endpoint::new("JSONPlaceholder", "https://jsonplaceholder.typicode.com/posts/1"),
        Endpoint::new("Dog Breeds API", "https://dog.ceo/api/breeds/list/all"),
    ]
}

/// Name ad-hoc URLs `Custom-1`, `Custom-2`, ...
pub fn custom_endpoints<I, S>(urls: I) -> Vec<Endpoint>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .enumerate()
        .map(|(i, url)| Endpoint::new(format!("Custom-{}", i + 1), url))
        .collect()
}
