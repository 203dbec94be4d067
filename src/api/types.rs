use serde::{Deserialize, Serialize};

/// A product category as published by the upstream API.
///
/// Decoding is lenient: absent fields fall back to their empty/zero value
/// and unknown fields are ignored. Timestamps are kept verbatim so that
/// `creation_at != updated_at` compares exactly what the server sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub creation_at: String,
    pub updated_at: String,
}

impl Category {
    /// True when the record was modified after creation.
    pub fn was_updated(&self) -> bool {
        self.creation_at != self.updated_at
    }
}

/// Why a fetch attempt failed, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// No complete response within the configured timeout.
    Timeout,
    /// A response arrived with a non-2xx status.
    ServerError { status: u16 },
    /// The request went out but no response came back.
    NetworkError,
    /// Anything else (undecodable body, oversized body, client setup).
    UnknownError,
}

/// Outcome of one `fetch_categories` call. Never partially filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success {
        categories: Vec<Category>,
    },
    Failure {
        reason: FailureReason,
        message: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::Failure { reason, .. } => Some(*reason),
        }
    }
}
