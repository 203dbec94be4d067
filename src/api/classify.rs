use super::types::{FailureReason, FetchResult};
use thiserror::Error;

/// Shown when the request did not complete within the timeout.
pub const MSG_TIMEOUT: &str = "Request timed out. Check your network connection.";
/// Shown when the request was sent but no response came back.
pub const MSG_NETWORK: &str = "Connection error. Check your network connection.";
/// Shown for anything that is neither a timeout, a server nor a network error.
pub const MSG_UNKNOWN: &str = "Unknown error";

/// Transport-level errors raised while fetching categories.
///
/// These never leave the `api` module: [`into_failure`] turns them into a
/// [`FetchResult::Failure`] with a user-facing message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The whole exchange exceeded the client timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Body was not a JSON array of categories
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Classify a transport error.
///
/// Priority: timeout, then server error, then network error, then unknown.
/// A reqwest error can satisfy more than one predicate (a timed-out connect
/// is both `is_timeout` and `is_connect`), so the guard order matters.
pub fn classify(error: &FetchError) -> FailureReason {
    match error {
        FetchError::Timeout => FailureReason::Timeout,
        FetchError::Network(e) if e.is_timeout() => FailureReason::Timeout,
        FetchError::HttpStatus(status) => FailureReason::ServerError { status: *status },
        FetchError::Network(e) if e.status().is_some() => FailureReason::ServerError {
            status: e.status().map_or(0, |s| s.as_u16()),
        },
        FetchError::Network(e) if e.is_connect() || e.is_request() || e.is_body() => {
            FailureReason::NetworkError
        }
        FetchError::Network(_) | FetchError::Decode(_) | FetchError::ResponseTooLarge => {
            FailureReason::UnknownError
        }
    }
}

/// User-facing message for a failure reason.
pub fn failure_message(reason: FailureReason) -> String {
    match reason {
        FailureReason::Timeout => MSG_TIMEOUT.to_string(),
        FailureReason::ServerError { status } => {
            let text = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status");
            format!("Server error: {} - {}", status, text)
        }
        FailureReason::NetworkError => MSG_NETWORK.to_string(),
        FailureReason::UnknownError => MSG_UNKNOWN.to_string(),
    }
}

/// Convert a transport error into a failed [`FetchResult`].
pub fn into_failure(error: FetchError) -> FetchResult {
    let reason = classify(&error);
    tracing::warn!(error = %error, reason = ?reason, "Category fetch failed");
    FetchResult::Failure {
        reason,
        message: failure_message(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timeout_classified_first() {
        assert_eq!(classify(&FetchError::Timeout), FailureReason::Timeout);
    }

    #[test]
    fn test_http_status_is_server_error() {
        assert_eq!(
            classify(&FetchError::HttpStatus(503)),
            FailureReason::ServerError { status: 503 }
        );
    }

    #[test]
    fn test_decode_and_size_are_unknown() {
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert_eq!(
            classify(&FetchError::Decode(decode)),
            FailureReason::UnknownError
        );
        assert_eq!(
            classify(&FetchError::ResponseTooLarge),
            FailureReason::UnknownError
        );
    }

    #[test]
    fn test_server_error_message_includes_status_and_text() {
        let msg = failure_message(FailureReason::ServerError { status: 500 });
        assert_eq!(msg, "Server error: 500 - Internal Server Error");
    }

    #[test]
    fn test_server_error_message_nonstandard_status() {
        let msg = failure_message(FailureReason::ServerError { status: 599 });
        assert!(msg.contains("599"));
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(failure_message(FailureReason::Timeout), MSG_TIMEOUT);
        assert_eq!(failure_message(FailureReason::NetworkError), MSG_NETWORK);
        assert_eq!(failure_message(FailureReason::UnknownError), MSG_UNKNOWN);
    }

    #[test]
    fn test_into_failure_carries_reason_and_message() {
        match into_failure(FetchError::HttpStatus(404)) {
            FetchResult::Failure { reason, message } => {
                assert_eq!(reason, FailureReason::ServerError { status: 404 });
                assert_eq!(message, "Server error: 404 - Not Found");
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }
}
