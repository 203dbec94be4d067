//! Card grid view.
//!
//! Each card shows the id badge, the capitalized name, the slug, the image
//! source (placeholder once a load has failed), the creation date and, only
//! for records modified after creation, the update date.

use crate::api::{Category, ImageStatus};
use crate::app::App;
use crate::util::{capitalize_name, format_short_date, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Card height including borders.
pub(super) const CARD_HEIGHT: u16 = 8;
/// Narrowest card before the grid drops a column.
const CARD_MIN_WIDTH: u16 = 28;
const MAX_COLUMNS: u16 = 4;

/// Render the visible categories as a grid, scrolled to keep the selection in view.
pub(super) fn render(f: &mut Frame, app: &App, categories: &[&Category], area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let columns = column_count(area.width);
    let selected_row = app.selected / columns;
    let visible_rows = visible_row_count(area.height);
    let first_row = (selected_row + 1).saturating_sub(visible_rows);

    let cells = grid_cells(area, categories.len(), first_row);
    for (index, rect) in cells {
        let Some(category) = categories.get(index) else {
            continue;
        };
        let border_role = if index == app.selected {
            "card_border_selected"
        } else {
            "card_border"
        };
        let inner_width = rect.width.saturating_sub(2) as usize;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(app.style(border_role));
        let card = Paragraph::new(card_lines(app, category, inner_width)).block(block);
        f.render_widget(card, rect);
    }
}

/// Text lines for one card, fitted to `width` columns.
///
/// The "Updated" line is present only when the record's timestamps differ.
pub fn card_lines(app: &App, category: &Category, width: usize) -> Vec<Line<'static>> {
    let tz = app.time_display;
    let fit = |s: &str| truncate_to_width(s, width).into_owned();

    let name = capitalize_name(&strip_control_chars(&category.name).replace('\n', " "));
    let slug = strip_control_chars(&category.slug).replace('\n', " ");

    let status = app.image_status_for(category.id);
    let image_role = match status {
        ImageStatus::Failed => "image_fallback",
        ImageStatus::Loaded => "image_source",
        ImageStatus::Loading => "card_meta",
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" ID: {} ", category.id),
            app.style("card_badge"),
        )),
        Line::from(Span::styled(fit(&name), app.style("card_title"))),
        Line::from(Span::styled(fit(&slug), app.style("card_slug"))),
        Line::from(Span::styled(
            fit(app.image_src(category)),
            app.style(image_role),
        )),
        Line::from(Span::styled(
            fit(&format!(
                "Created: {}",
                format_short_date(&category.creation_at, tz)
            )),
            app.style("card_meta"),
        )),
    ];

    if category.was_updated() {
        lines.push(Line::from(Span::styled(
            fit(&format!(
                "Updated: {}",
                format_short_date(&category.updated_at, tz)
            )),
            app.style("card_meta"),
        )));
    }

    lines
}

/// Columns that fit in `width`, between 1 and 4.
pub(super) fn column_count(width: u16) -> usize {
    (width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS) as usize
}

/// Full card rows that fit in `height`, at least one.
fn visible_row_count(height: u16) -> usize {
    (height / CARD_HEIGHT).max(1) as usize
}

/// Screen rectangles for `count` cards starting at grid row `first_row`.
///
/// Returns (card index, rect) pairs for the cards that fit in `area`.
pub(super) fn grid_cells(area: Rect, count: usize, first_row: usize) -> Vec<(usize, Rect)> {
    let columns = column_count(area.width);
    let card_width = area.width / columns as u16;
    let card_height = CARD_HEIGHT.min(area.height);
    let rows = visible_row_count(area.height);

    let mut cells = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for col in 0..columns {
            let index = (first_row + row) * columns + col;
            if index >= count {
                return cells;
            }
            let y = area.y + row as u16 * card_height;
            let height = card_height.min(area.bottom().saturating_sub(y));
            if height == 0 {
                return cells;
            }
            let rect = Rect::new(area.x + col as u16 * card_width, y, card_width, height);
            cells.push((index, rect));
        }
    }
    cells
}
