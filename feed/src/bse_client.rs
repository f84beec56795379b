use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, REFERER, USER_AGENT};
use reqwest::Client;
use serde_json::{Map, Value};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::models::AnnouncementQuery;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BSE_REFERER: &str = "https://www.bseindia.com/";

/// Anything that can hand back one raw page of announcements.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, endpoint: &str, query: &AnnouncementQuery, page: u32) -> Result<Map<String, Value>>;
}

/// The provider rejects requests that don't look like they come from its own site.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(BSE_REFERER));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// HTTP session against the provider. Build one per incoming request and
/// drop it when the request is done.
pub struct BseClient {
    client: Client,
}

impl BseClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(config.request_timeout)
            .build()
            .map_err(FeedError::ClientBuild)?;

        Ok(Self { client })
    }
}

/// Parses a page body. Content type is ignored since the provider sometimes
/// serves JSON as text, occasionally with a byte order mark.
pub fn parse_page(body: &str) -> Result<Map<String, Value>> {
    let body = body.trim_start_matches('\u{feff}');
    match serde_json::from_str::<Value>(body)? {
        Value::Object(page) => Ok(page),
        other => Err(FeedError::UnexpectedShape(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl PageSource for BseClient {
    async fn fetch_page(&self, endpoint: &str, query: &AnnouncementQuery, page: u32) -> Result<Map<String, Value>> {
        let response = self
            .client
            .get(endpoint)
            .query(query)
            .query(&[("pageno", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_mimic_the_website() {
        let headers = browser_headers();
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Chrome/120.0.0.0"));
        assert_eq!(headers[REFERER], "https://www.bseindia.com/");
        assert_eq!(headers[ACCEPT], "application/json, text/plain, */*");
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.9");
    }

    #[test]
    fn parse_page_strips_bom() {
        let page = parse_page("\u{feff}{\"Table\": []}").unwrap();
        assert!(page.contains_key("Table"));
    }

    #[test]
    fn parse_page_rejects_non_objects() {
        assert!(matches!(parse_page("[1, 2]"), Err(FeedError::UnexpectedShape(_))));
        assert!(matches!(parse_page("<html>busy</html>"), Err(FeedError::Parse(_))));
    }
}
