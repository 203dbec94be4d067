//! Render functions for the TUI.
//!
//! This module handles the size guard and dispatches on the view phase:
//! loading, failed, or loaded. Overlays are drawn last.

use crate::app::App;
use crate::state::{Phase, ViewMode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{cards, error, help, loading, status, table, toolbar};

/// Minimum terminal dimensions required for normal operation.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Handles terminal size validation before rendering.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Nothing meaningful fits in a zero-sized area
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    toolbar::render_header(f, app, chunks[0]);

    match app.state.phase() {
        Phase::Loading => loading::render(f, app, chunks[1]),
        Phase::Failed(message) => error::render(f, app, message, chunks[1]),
        Phase::Loaded => render_loaded(f, app, chunks[1]),
    }

    status::render(f, app, chunks[2]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Filter box, counts line, then the list body.
fn render_loaded(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    toolbar::render_filter(f, app, chunks[0]);
    toolbar::render_counts(f, app, chunks[1]);

    let body = chunks[2];
    let state = &app.state;

    if !state.filter_valid() {
        render_empty(
            f,
            app,
            body,
            &["Enter at least 2 characters to search"],
            "hint_error",
        );
        return;
    }

    if state.shows_no_results() {
        render_empty(
            f,
            app,
            body,
            &["No categories found", "Try another search term"],
            "empty_state",
        );
        return;
    }

    let visible = state.visible_categories();
    if visible.is_empty() {
        render_empty(f, app, body, &["No categories found"], "empty_state");
        return;
    }

    match state.view_mode {
        ViewMode::Table => table::render(f, app, &visible, body),
        ViewMode::Cards => cards::render(f, app, &visible, body),
    }
}

/// Centered message lines in place of the list.
fn render_empty(f: &mut Frame, app: &App, area: Rect, lines: &[&'static str], role: &str) {
    if area.height < 1 {
        return;
    }
    let mut text: Vec<Line> = Vec::with_capacity(lines.len() + 1);
    let pad = area.height.saturating_sub(lines.len() as u16) / 2;
    text.extend((0..pad).map(|_| Line::from("")));
    text.extend(lines.iter().map(|l| Line::from(*l)));

    let paragraph = Paragraph::new(text)
        .style(app.style(role))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Create a rectangle of at most `width` x `height` centered in `area`.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    centered_fixed(width, height, area)
}
