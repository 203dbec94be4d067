//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **URL validation**: Scheme checks before a URL is requested or opened
//! - **Text processing**: Control-character stripping and width-aware truncation
//! - **Dates**: Display formatting for the ISO-8601 timestamps the API sends
//! - **Tasks**: Panic capture for spawned background work
//!
//! # Examples
//!
//! ```
//! use aisle::util::{capitalize_name, format_timestamp, truncate_to_width, TimeDisplay};
//!
//! assert_eq!(capitalize_name("eLECTRONICS"), "Electronics");
//! assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
//! assert_eq!(
//!     format_timestamp("2023-01-15T10:30:00.000Z", TimeDisplay::Utc),
//!     "15/01/2023 10:30:00"
//! );
//! ```

mod dates;
mod task;
mod text;
mod url_validator;

pub use dates::{format_short_date, format_timestamp, TimeDisplay};
pub use task::catch_task_panic;
pub use text::{capitalize_name, display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_http_url, UrlValidationError};
