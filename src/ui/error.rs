use crate::app::App;
use crate::util::strip_control_chars;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::render::centered_fixed;

const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 9;

/// Centered error panel: title, message, and the retry control.
pub(super) fn render(f: &mut Frame, app: &App, message: &str, area: Rect) {
    let panel = centered_fixed(PANEL_WIDTH, PANEL_HEIGHT, area);
    if panel.width < 10 || panel.height < 3 {
        return;
    }

    let message = strip_control_chars(message);
    let lines = vec![
        Line::from(Span::styled(
            "Error loading categories",
            app.style("error_title"),
        )),
        Line::from(""),
        Line::from(Span::styled(message.into_owned(), app.style("error_text"))),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("[ {} ]", app.retry_label()), app.style("retry_button")),
            Span::styled("  r / Enter", app.style("card_meta")),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("error_border"))
        .title(" Error ");

    f.render_widget(Clear, panel);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        panel,
    );
}
