use crate::api::{Category, ImageStatus};
use crate::app::App;
use crate::util::{format_timestamp, strip_control_chars};
use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

const HEADERS: [&str; 5] = ["ID", "Name", "Image", "Created", "Updated"];

/// Render the table view of the visible categories.
pub(super) fn render(f: &mut Frame, app: &App, categories: &[&Category], area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let rows: Vec<Row> = categories.iter().map(|c| category_row(app, c)).collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(14),
        Constraint::Fill(1),
        Constraint::Length(19),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(HEADERS).style(app.style("table_header")))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(" Categories "),
        )
        .row_highlight_style(app.style("row_selected"));

    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn category_row<'a>(app: &App, category: &'a Category) -> Row<'a> {
    let tz = app.time_display;
    let status = app.image_status_for(category.id);
    let image = match status {
        ImageStatus::Failed => Span::styled(app.image_src(category), app.style("image_fallback")),
        ImageStatus::Loading | ImageStatus::Loaded => {
            Span::styled(app.image_src(category), app.style("image_source"))
        }
    };

    Row::new(vec![
        Cell::from(Span::styled(category.id.to_string(), app.style("table_id"))),
        Cell::from(strip_control_chars(&category.name)),
        Cell::from(image),
        Cell::from(Span::styled(
            format_timestamp(&category.creation_at, tz),
            app.style("table_date"),
        )),
        Cell::from(Span::styled(
            format_timestamp(&category.updated_at, tz),
            app.style("table_date"),
        )),
    ])
}
