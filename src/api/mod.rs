//! Remote category source.
//!
//! Everything that talks to the upstream REST API lives here:
//!
//! - [`types`] - `Category` records and the tagged `FetchResult`
//! - [`client`] - HTTP client with a bounded timeout and body size
//! - [`classify`] - Maps transport errors to user-facing failure reasons
//! - [`image`] - Per-category image status and the placeholder fallback
//!
//! No transport error crosses this boundary: callers only ever see a
//! [`FetchResult`] or an [`ImageStatus`].

mod classify;
mod client;
mod image;
mod types;

pub use classify::{
    classify, failure_message, into_failure, FetchError, MSG_NETWORK, MSG_TIMEOUT, MSG_UNKNOWN,
};
pub use client::{CategoryClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use image::{image_source, probe_image, validate_image_url, ImageStatus, PLACEHOLDER_IMAGE};
pub use types::{Category, FailureReason, FetchResult};
