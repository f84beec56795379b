use std::env;
use std::time::Duration;

pub const BSE_PRIMARY_URL: &str = "https://api.bseindia.com/BseIndiaAPI/api/AnnSubCategoryGetData/w";
pub const BSE_FALLBACK_URL: &str = "https://api.bseindia.com/BseIndiaAPI/api/AnnGetData/w";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Upstream settings shared by every request.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub primary_url: String,
    pub fallback_url: String,
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            primary_url: BSE_PRIMARY_URL.to_string(),
            fallback_url: BSE_FALLBACK_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            primary_url: env::var("BSE_PRIMARY_URL").unwrap_or_else(|_| BSE_PRIMARY_URL.to_string()),
            fallback_url: env::var("BSE_FALLBACK_URL").unwrap_or_else(|_| BSE_FALLBACK_URL.to_string()),
            request_timeout: Duration::from_secs(
                env::var("BSE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Endpoint chain in the order it is tried.
    pub fn endpoints(&self) -> Vec<String> {
        vec![self.primary_url.clone(), self.fallback_url.clone()]
    }
}
