//! Help overlay listing the live keybindings, overrides included.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::render::centered_rect;

/// Section order on the help screen.
const SECTIONS: [Context; 4] = [
    Context::Global,
    Context::Browse,
    Context::Error,
    Context::Filter,
];

/// Rows above and below the table body: two borders and the column header.
const CHROME_ROWS: u16 = 3;

/// One section heading per context, its bindings, then a spacer.
fn help_rows(app: &App) -> Vec<Row<'static>> {
    let bindings = app.keybindings.all_bindings();
    let heading = app.style("table_header").add_modifier(Modifier::BOLD);

    let mut rows = Vec::with_capacity(bindings.len() + SECTIONS.len() * 2);
    for section in SECTIONS {
        let mut entries = bindings.iter().filter(|(ctx, ..)| *ctx == section).peekable();
        if entries.peek().is_none() {
            continue;
        }
        if !rows.is_empty() {
            rows.push(Row::new([String::new(), String::new()]));
        }
        rows.push(Row::new([
            Line::styled(format!("[{}]", section.label()), heading),
            Line::default(),
        ]));
        rows.extend(
            entries.map(|(_, key, _, desc)| Row::new([format!("  {}", key), desc.to_string()])),
        );
    }
    rows
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    let rows = help_rows(app);
    let page = overlay.height.saturating_sub(CHROME_ROWS) as usize;
    let max_scroll = rows.len().saturating_sub(page);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let title = match max_scroll {
        0 => " Help (? to close) ".to_string(),
        _ => format!(" Help {}/{} ", scroll + 1, max_scroll + 1),
    };

    let table = Table::new(
        rows.into_iter().skip(scroll).take(page),
        [Constraint::Length(16), Constraint::Min(20)],
    )
    .header(
        Row::new(["Key", "Action"])
            .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(title),
    );

    f.render_widget(Clear, overlay);
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let footer = Rect {
            x: overlay.x + 1,
            y: overlay.bottom().saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k scroll · Esc close ",
                app.style("card_meta"),
            )),
            footer,
        );
    }
}
