//! Client configuration.

use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::Url;

use stockroom_orders::PartialFailurePolicy;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the inventory API lives and how the client talks to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every `api/...` path is resolved against.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// What `submit_order` does with a header whose items failed.
    pub partial_failure: PartialFailurePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            partial_failure: PartialFailurePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Reads `STOCKROOM_API_URL`, `STOCKROOM_TIMEOUT_SECS` and
    /// `STOCKROOM_COMPENSATE`, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("STOCKROOM_API_URL") {
            config.api_url = url;
        }

        if let Some(raw) = lookup("STOCKROOM_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("STOCKROOM_TIMEOUT_SECS must be whole seconds, got {raw:?}"))?;
            if secs == 0 {
                bail!("STOCKROOM_TIMEOUT_SECS must be greater than zero");
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("STOCKROOM_COMPENSATE") {
            config.partial_failure = parse_compensate(&raw)
                .with_context(|| format!("invalid STOCKROOM_COMPENSATE value {raw:?}"))?;
        }

        config.base_url()?;
        Ok(config)
    }

    /// `api_url` parsed, with a trailing slash so relative joins append.
    pub fn base_url(&self) -> anyhow::Result<Url> {
        let mut raw = self.api_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).with_context(|| format!("invalid API URL {:?}", self.api_url))?;
        if url.cannot_be_a_base() {
            bail!("API URL {:?} cannot be used as a base", self.api_url);
        }
        Ok(url)
    }
}

fn parse_compensate(raw: &str) -> anyhow::Result<PartialFailurePolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(PartialFailurePolicy::Compensate),
        "0" | "false" | "no" | "off" => Ok(PartialFailurePolicy::LeaveOrphan),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
