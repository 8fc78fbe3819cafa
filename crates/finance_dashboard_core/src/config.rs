use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied to every request; an expired request surfaces as a network error.
    pub request_timeout: Duration,
    /// Max simultaneous uploads per import batch. `None` means one request per file at once.
    pub upload_concurrency: Option<usize>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_concurrency: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_upload_concurrency(mut self, limit: Option<usize>) -> Self {
        self.upload_concurrency = limit.filter(|n| *n > 0);
        self
    }

    /// Reads `FINANCE_API_URL`, `FINANCE_API_TIMEOUT_SECS` and `FINANCE_IMPORT_CONCURRENCY`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("FINANCE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match lookup("FINANCE_API_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("FINANCE_API_TIMEOUT_SECS={:?}: {}", v, e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let concurrency = match lookup("FINANCE_IMPORT_CONCURRENCY") {
            Some(v) => Some(
                v.trim()
                    .parse::<usize>()
                    .map_err(|e| anyhow::anyhow!("FINANCE_IMPORT_CONCURRENCY={:?}: {}", v, e))?,
            ),
            None => None,
        };
        Ok(Self::new(base_url)
            .with_request_timeout(Duration::from_secs(timeout_secs))
            .with_upload_concurrency(concurrency))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
