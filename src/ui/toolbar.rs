use crate::app::App;
use crate::state::ViewMode;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TITLE: &str = "Product Categories";
const SUBTITLE: &str = "Explore our wide selection of categories";
const FILTER_PLACEHOLDER: &str = "Search categories by name...";

/// Title and subtitle on the left, view tabs on the right.
pub(super) fn render_header(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(TITLE, app.style("header_title"))),
        Line::from(Span::styled(SUBTITLE, app.style("header_subtitle"))),
    ]);
    f.render_widget(title, chunks[0]);

    let tab = |label: &'static str, mode: ViewMode| {
        let role = if app.state.view_mode == mode {
            "view_tab_active"
        } else {
            "view_tab_inactive"
        };
        Span::styled(label, app.style(role))
    };
    let tabs = Paragraph::new(Line::from(vec![
        tab(" 1 Table ", ViewMode::Table),
        Span::raw(" "),
        tab(" 2 Cards ", ViewMode::Cards),
    ]))
    .alignment(Alignment::Right);
    f.render_widget(tabs, chunks[1]);
}

/// The filter input box. Red border while the filter is too short.
pub(super) fn render_filter(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let state = &app.state;
    let border_role = if !state.filter_valid() {
        "filter_invalid"
    } else if app.filter_mode {
        "filter_border_active"
    } else {
        "filter_border"
    };

    let inner_width = area.width.saturating_sub(4) as usize;
    let content = if state.has_filter() {
        let text = strip_control_chars(&state.filter_text);
        let cursor = if app.filter_mode { "_" } else { "" };
        Line::from(vec![
            Span::raw(truncate_to_width(&text, inner_width.saturating_sub(1)).into_owned()),
            Span::raw(cursor),
        ])
    } else if app.filter_mode {
        Line::from("_")
    } else {
        Line::from(Span::styled(FILTER_PLACEHOLDER, app.style("card_meta")))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style(border_role))
        .title(" Filter (/) ");
    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Total count, plus the filtered count while a filter is set.
pub(super) fn render_counts(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let state = &app.state;
    let mut spans = vec![
        Span::raw(" Total: "),
        Span::styled(state.categories.len().to_string(), app.style("stats_total")),
    ];
    if state.has_filter() {
        spans.push(Span::raw("   Filtered: "));
        spans.push(Span::styled(
            state.filtered_categories().len().to_string(),
            app.style("stats_filtered"),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
