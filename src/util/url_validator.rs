use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validate that a string is an absolute http(s) URL with a host.
///
/// Used for the API base URL, for image URLs before they are probed, and
/// before handing a URL to the system browser (which would otherwise happily
/// launch `file://` or custom-scheme handlers).
///
/// ```
/// use aisle::util::validate_http_url;
///
/// assert!(validate_http_url("https://i.imgur.com/a.jpeg").is_ok());
/// assert!(validate_http_url("file:///etc/passwd").is_err());
/// assert!(validate_http_url("not a url").is_err());
/// ```
pub fn validate_http_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
