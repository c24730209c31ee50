use std::time::Duration;

use futures_util::StreamExt;
use jobwatch_core::ListingPage;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use url::Url;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

/// Paginated source of listings.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches one 1-based page, identifying as `user_agent`.
    async fn fetch_page(&self, page: u64, user_agent: &str) -> Result<ListingPage, FetchError>;
}

/// Page 1 lives at the bare endpoint; later pages carry `?page=N`.
pub fn page_url(endpoint: &Url, page: u64) -> Url {
    let mut url = endpoint.clone();
    if page > 1 {
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
    }
    url
}

#[derive(Debug, Clone)]
pub struct ReqwestListingSource {
    endpoint: Url,
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestListingSource {
    pub fn new(endpoint: Url, settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoint,
            settings,
            client,
        })
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.to_ascii_lowercase();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| ct.contains(&allowed.to_ascii_lowercase()))
    }
}

#[async_trait::async_trait]
impl ListingSource for ReqwestListingSource {
    async fn fetch_page(&self, page: u64, user_agent: &str) -> Result<ListingPage, FetchError> {
        let url = page_url(&self.endpoint, page);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if !content_type
            .as_deref()
            .is_some_and(|ct| self.is_content_type_allowed(ct))
        {
            return Err(FetchError::new(
                FailureKind::UnsupportedContentType { content_type },
                "expected a JSON response",
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        Ok(ListingPage::from_value(&value))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
