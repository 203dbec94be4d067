use crate::util::validate_http_url;
use reqwest::header::{HeaderValue, ACCEPT};
use std::time::Duration;

/// Substituted for any category image that fails to load.
pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/300x200/f3f4f6/9ca3af?text=No+Image";

/// Load state of one category image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// True when `url` is an absolute http(s) URL worth requesting.
pub fn validate_image_url(url: &str) -> bool {
    validate_http_url(url).is_ok()
}

/// The image URL to display for a given load state.
pub fn image_source(image: &str, status: ImageStatus) -> &str {
    match status {
        ImageStatus::Failed => PLACEHOLDER_IMAGE,
        ImageStatus::Loading | ImageStatus::Loaded => image,
    }
}

/// Check whether an image URL actually serves something.
///
/// Invalid URLs fail without a request. Anything other than a 2xx response
/// within `timeout` counts as a failed load. The body is never read.
/// The request asks for `image/*` so hosts that negotiate on `Accept` answer
/// the way a browser `<img>` load would.
pub async fn probe_image(client: &reqwest::Client, url: &str, timeout: Duration) -> ImageStatus {
    let parsed = match validate_http_url(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Image URL rejected");
            return ImageStatus::Failed;
        }
    };

    let request = client
        .get(parsed)
        .header(ACCEPT, HeaderValue::from_static("image/*"))
        .send();

    match tokio::time::timeout(timeout, request).await {
        Ok(Ok(response)) if response.status().is_success() => ImageStatus::Loaded,
        Ok(Ok(response)) => {
            tracing::debug!(url = %url, status = %response.status(), "Image load failed");
            ImageStatus::Failed
        }
        Ok(Err(e)) => {
            tracing::debug!(url = %url, error = %e, "Image request failed");
            ImageStatus::Failed
        }
        Err(_) => {
            tracing::debug!(url = %url, "Image request timed out");
            ImageStatus::Failed
        }
    }
}
