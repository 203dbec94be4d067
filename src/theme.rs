//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant`
//! selects a palette and `StyleMap` resolves role names at render time.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every styled element on the categories screen.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header and toolbar --
    pub header_title: Style,
    pub header_subtitle: Style,
    pub filter_border: Style,
    pub filter_border_active: Style,
    pub filter_invalid: Style,
    pub hint_error: Style,
    pub stats_total: Style,
    pub stats_filtered: Style,
    pub view_tab_active: Style,
    pub view_tab_inactive: Style,

    // -- Table --
    pub table_header: Style,
    pub table_id: Style,
    pub table_date: Style,
    pub row_selected: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_border_selected: Style,
    pub card_badge: Style,
    pub card_title: Style,
    pub card_slug: Style,
    pub card_meta: Style,
    pub image_source: Style,
    pub image_fallback: Style,

    // -- Loading / error / empty --
    pub skeleton: Style,
    pub spinner: Style,
    pub error_border: Style,
    pub error_title: Style,
    pub error_text: Style,
    pub retry_button: Style,
    pub empty_state: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(Color::Gray),
            filter_border: Style::default().fg(Color::DarkGray),
            filter_border_active: Style::default().fg(Color::Cyan),
            filter_invalid: Style::default().fg(Color::Red),
            hint_error: Style::default().fg(Color::Red),
            stats_total: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            stats_filtered: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            view_tab_active: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            view_tab_inactive: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            table_id: Style::default().fg(Color::Magenta),
            table_date: Style::default().fg(Color::Gray),
            row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            card_border: Style::default().fg(Color::DarkGray),
            card_border_selected: Style::default().fg(Color::Cyan),
            card_badge: Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_slug: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),
            image_source: Style::default().fg(Color::Blue),
            image_fallback: Style::default().fg(Color::Yellow),

            skeleton: Style::default().fg(Color::DarkGray),
            spinner: Style::default().fg(Color::Cyan),
            error_border: Style::default().fg(Color::Red),
            error_title: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(Color::LightRed),
            retry_button: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            empty_state: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(Color::DarkGray),
            filter_border: Style::default().fg(Color::Gray),
            filter_border_active: Style::default().fg(Color::Blue),
            filter_invalid: Style::default().fg(Color::Red),
            hint_error: Style::default().fg(Color::Red),
            stats_total: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            stats_filtered: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            view_tab_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            view_tab_inactive: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            table_id: Style::default().fg(Color::Magenta),
            table_date: Style::default().fg(Color::DarkGray),
            row_selected: Style::default().bg(Color::Blue).fg(Color::White),

            card_border: Style::default().fg(Color::Gray),
            card_border_selected: Style::default().fg(Color::Blue),
            card_badge: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_slug: Style::default().fg(Color::DarkGray),
            card_meta: Style::default().fg(Color::DarkGray),
            image_source: Style::default().fg(Color::Blue),
            image_fallback: Style::default().fg(Color::Magenta),

            skeleton: Style::default().fg(Color::Gray),
            spinner: Style::default().fg(Color::Blue),
            error_border: Style::default().fg(Color::Red),
            error_title: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            error_text: Style::default().fg(Color::Red),
            retry_button: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            empty_state: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
pub const ROLE_NAMES: [&str; 32] = [
    "header_title",
    "header_subtitle",
    "filter_border",
    "filter_border_active",
    "filter_invalid",
    "hint_error",
    "stats_total",
    "stats_filtered",
    "view_tab_active",
    "view_tab_inactive",
    "table_header",
    "table_id",
    "table_date",
    "row_selected",
    "card_border",
    "card_border_selected",
    "card_badge",
    "card_title",
    "card_slug",
    "card_meta",
    "image_source",
    "image_fallback",
    "skeleton",
    "spinner",
    "error_border",
    "error_title",
    "error_text",
    "retry_button",
    "empty_state",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 32] = [
            p.header_title,
            p.header_subtitle,
            p.filter_border,
            p.filter_border_active,
            p.filter_invalid,
            p.hint_error,
            p.stats_total,
            p.stats_filtered,
            p.view_tab_active,
            p.view_tab_inactive,
            p.table_header,
            p.table_id,
            p.table_date,
            p.row_selected,
            p.card_border,
            p.card_border_selected,
            p.card_badge,
            p.card_title,
            p.card_slug,
            p.card_meta,
            p.image_source,
            p.image_fallback,
            p.skeleton,
            p.spinner,
            p.error_border,
            p.error_title,
            p.error_text,
            p.retry_button,
            p.empty_state,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
