use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the booking backend lives and how long a request may take.
///
/// The defaults are baked in at compile time from `SALON_API_URL` and
/// `SALON_API_TIMEOUT_SECS` so the server render and the hydrated client agree.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("SALON_API_URL"),
            option_env!("SALON_API_TIMEOUT_SECS"),
        )
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
        }
    }

    /// Blank or malformed values fall back to the defaults.
    pub fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let secs = timeout_secs
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(base_url, Duration::from_secs(secs))
    }

    /// Reads the process environment (after loading `.env`), falling back to
    /// the compiled defaults.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let compiled = Self::default();
        let base_url = std::env::var("SALON_API_URL").unwrap_or(compiled.base_url);
        let timeout = std::env::var("SALON_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| compiled.request_timeout.as_secs().to_string());
        Self::from_values(Some(&base_url), Some(&timeout))
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
