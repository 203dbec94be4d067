use crate::app::{App, SPINNER_FRAMES};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::cards::grid_cells;

/// Placeholder cards drawn while the first fetch is pending.
pub(super) const SKELETON_CARDS: usize = 8;

const SPINNER: [char; SPINNER_FRAMES] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner with a message, then a grid of skeleton cards.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let frame = SPINNER[app.spinner_frame % SPINNER_FRAMES];
    let message = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{} ", frame), app.style("spinner")),
            Span::styled("Loading categories...", app.style("header_title")),
        ]),
        Line::from(Span::styled("Please wait a moment", app.style("header_subtitle"))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    for (_, rect) in grid_cells(chunks[1], SKELETON_CARDS, 0) {
        render_skeleton(f, app, rect);
    }
}

/// One grey card with bars where the text will go.
fn render_skeleton(f: &mut Frame, app: &App, rect: Rect) {
    let inner = rect.width.saturating_sub(2) as usize;
    let bar = |percent: usize| "░".repeat(inner * percent / 100);
    let lines: Vec<Line> = [30, 80, 50, 90, 60]
        .into_iter()
        .map(|p| Line::from(bar(p)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("skeleton"));
    f.render_widget(
        Paragraph::new(lines).style(app.style("skeleton")).block(block),
        rect,
    );
}
