//! Terminal User Interface module.
//!
//! This module renders the categories screen and drives it, including:
//! - Main event loop (`run`)
//! - Input handling for the list, the error panel and the filter box
//! - Rendering of the loading, error and loaded states
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - State dispatch and the size guard
//! - `toolbar` - Header, filter box and counts
//! - `table` - Table view
//! - `cards` - Card grid view
//! - `loading` - Spinner and skeleton cards
//! - `error` - Error panel with the retry control
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod cards;
mod error;
mod events;
mod help;
mod input;
mod loading;
mod loop_runner;
mod render;
mod status;
mod table;
mod toolbar;

// Re-export the public API
pub use cards::card_lines;
pub use events::handle_app_event;
pub use input::handle_input;
pub use loop_runner::{run, Action};
pub use render::{render, MIN_HEIGHT, MIN_WIDTH};
