//! Terminal browser for the product categories of a public REST API.
//!
//! - [`api`] fetches categories and classifies failures
//! - [`state`] is the immutable view state and its derived views
//! - [`app`] owns the fetch lifecycle and everything the UI reads
//! - [`ui`] draws it with ratatui and maps keys to actions

pub mod api;
pub mod app;
pub mod config;
pub mod keybindings;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
