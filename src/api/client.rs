use super::classify::{into_failure, FetchError};
use super::types::{Category, FetchResult};
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

/// Public API the categories are read from.
pub const DEFAULT_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
/// Upper bound for one fetch, send and body read included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// HTTP client for the upstream categories endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so a
/// clone can be moved into each spawned fetch task.
#[derive(Debug, Clone)]
pub struct CategoryClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CategoryClient {
    /// Build a client for `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored. The JSON headers go on the
    /// categories request only, since image probes share this client.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("aisle/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Underlying HTTP client, shared with image probes.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the categories endpoint.
    pub fn categories_url(&self) -> String {
        format!("{}/categories", self.base_url)
    }

    /// Fetch every category, in server order.
    ///
    /// Never returns a transport error: failures are classified and come
    /// back as [`FetchResult::Failure`]. No retries happen here; retrying is
    /// the caller invoking this again.
    pub async fn fetch_categories(&self) -> FetchResult {
        let url = self.categories_url();
        tracing::debug!(url = %url, "Fetching categories");

        let outcome = match tokio::time::timeout(self.timeout, self.request(&url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };

        match outcome {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Fetched categories");
                FetchResult::Success { categories }
            }
            Err(e) => into_failure(e),
        }
    }

    async fn request(&self, url: &str) -> Result<Vec<Category>, FetchError> {
        let response = self.http.get(url).headers(json_headers()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_BODY_SIZE).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
