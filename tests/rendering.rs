//! Rendering tests against ratatui's `TestBackend`.
//!
//! The app is put into each state directly (no network), drawn into an
//! in-memory buffer, and the buffer text is searched for what a user would see.

use aisle::api::{
    Category, CategoryClient, FailureReason, FetchResult, ImageStatus, PLACEHOLDER_IMAGE,
};
use aisle::app::{App, AppEvent};
use aisle::state::ViewMode;
use aisle::ui::{card_lines, render};
use ratatui::{backend::TestBackend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;

fn test_app(mode: ViewMode) -> (App, mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
    // Never contacted: nothing here calls load()
    let client =
        CategoryClient::new("http://127.0.0.1:9/api/v1", Duration::from_secs(1)).unwrap();
    let (tx, rx) = mpsc::channel(64);
    (App::new(client, mode), tx, rx)
}

fn category(id: i64, name: &str, created: &str, updated: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        image: String::new(),
        creation_at: created.to_string(),
        updated_at: updated.to_string(),
    }
}

fn settle(app: &mut App, tx: &mpsc::Sender<AppEvent>, result: FetchResult) {
    app.fetch_generation = 1;
    assert!(app.apply_fetch(1, result, tx));
}

fn load(app: &mut App, tx: &mpsc::Sender<AppEvent>, categories: Vec<Category>) {
    settle(app, tx, FetchResult::Success { categories });
}

fn sample() -> Vec<Category> {
    vec![
        category(1, "clothes", "2023-01-15T10:30:00.000Z", "2023-01-15T10:30:00.000Z"),
        category(2, "Shoes", "2023-01-15T10:30:00.000Z", "2023-01-15T10:30:00.000Z"),
        category(3, "Electronics", "2023-02-01T08:00:00.000Z", "2023-03-05T09:15:00.000Z"),
    ]
}

/// Draw the app and return the screen as one string, rows joined by newlines.
fn draw(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn line_text(line: &ratatui::text::Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

// ============================================================================
// Top-level states
// ============================================================================

#[tokio::test]
async fn test_loading_screen() {
    let (app, _tx, _rx) = test_app(ViewMode::Table);
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Product Categories"));
    assert!(screen.contains("Loading categories..."));
    assert!(screen.contains("░"));
    assert!(!screen.contains("Total:"));
}

#[tokio::test]
async fn test_error_screen_with_retry_label() {
    let (mut app, tx, _rx) = test_app(ViewMode::Table);
    settle(
        &mut app,
        &tx,
        FetchResult::Failure {
            reason: FailureReason::ServerError { status: 500 },
            message: "Server error: 500 - Internal Server Error".into(),
        },
    );

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Error loading categories"));
    assert!(screen.contains("Server error: 500 - Internal Server Error"));
    assert!(screen.contains("[ Retry ]"));

    app.retry_count = 2;
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("[ Retry (2) ]"));
}

#[tokio::test]
async fn test_terminal_too_small() {
    let (app, _tx, _rx) = test_app(ViewMode::Table);
    let screen = draw(&app, 40, 8);
    assert!(screen.contains("Terminal too small"));
    assert!(screen.contains("Current: 40x8"));

    let screen = draw(&app, 15, 2);
    assert!(screen.contains("Too small"));
}

// ============================================================================
// Filter states
// ============================================================================

#[tokio::test]
async fn test_counts_line() {
    let (mut app, tx, _rx) = test_app(ViewMode::Table);
    load(&mut app, &tx, sample());

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Total: 3"));
    assert!(!screen.contains("Filtered:"));

    app.set_filter("sho");
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Total: 3"));
    assert!(screen.contains("Filtered: 1"));
}

#[tokio::test]
async fn test_single_char_filter_hides_list() {
    let (mut app, tx, _rx) = test_app(ViewMode::Table);
    load(&mut app, &tx, sample());
    app.set_filter("e");

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Enter at least 2 characters to search"));
    assert!(!screen.contains("Electronics"));
    assert!(!screen.contains("Shoes"));
}

#[tokio::test]
async fn test_single_char_filter_still_counts_matches() {
    let (mut app, tx, _rx) = test_app(ViewMode::Cards);
    load(&mut app, &tx, sample());
    app.set_filter("e");

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Enter at least 2 characters to search"));
    assert!(screen.contains("Total: 3"));
    assert!(screen.contains("Filtered: 3"));

    app.set_filter("x");
    let screen = draw(&app, 100, 30);
    assert!(screen.contains("Filtered: 0"));
}

#[tokio::test]
async fn test_no_results_empty_state() {
    let (mut app, tx, _rx) = test_app(ViewMode::Cards);
    load(&mut app, &tx, sample());
    app.set_filter("zzz");

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("No categories found"));
    assert!(screen.contains("Try another search term"));
}

// ============================================================================
// Table and cards
// ============================================================================

#[tokio::test]
async fn test_table_rows_and_dates() {
    let (mut app, tx, _rx) = test_app(ViewMode::Table);
    load(&mut app, &tx, sample());

    let screen = draw(&app, 120, 30);
    for header in ["ID", "Name", "Image", "Created", "Updated"] {
        assert!(screen.contains(header), "missing header {}", header);
    }
    assert!(screen.contains("Shoes"));
    assert!(screen.contains("15/01/2023 10:30:00"));
    assert!(screen.contains("05/03/2023 09:15:00"));
}

#[tokio::test]
async fn test_cards_view_shows_capitalized_names() {
    let (mut app, tx, _rx) = test_app(ViewMode::Cards);
    load(&mut app, &tx, sample());

    let screen = draw(&app, 100, 30);
    assert!(screen.contains("ID: 1"));
    assert!(screen.contains("Clothes"));
    assert!(screen.contains("Created: 15 Jan 2023"));
}

#[tokio::test]
async fn test_card_updated_line_only_when_timestamps_differ() {
    let (app, _tx, _rx) = test_app(ViewMode::Cards);

    let same = category(7, "Shoes", "2023-01-01T00:00:00Z", "2023-01-01T00:00:00Z");
    let lines: Vec<String> = card_lines(&app, &same, 60).iter().map(line_text).collect();
    assert!(lines.iter().any(|l| l == "Created: 01 Jan 2023"));
    assert!(!lines.iter().any(|l| l.starts_with("Updated:")));

    let changed = Category {
        updated_at: "2023-06-01T12:00:00Z".into(),
        ..same
    };
    let lines: Vec<String> = card_lines(&app, &changed, 60).iter().map(line_text).collect();
    assert!(lines.iter().any(|l| l == "Updated: 01 Jun 2023"));
}

#[tokio::test]
async fn test_failed_image_shows_placeholder_source() {
    let (mut app, tx, _rx) = test_app(ViewMode::Cards);
    let mut shoes = category(7, "shoes", "2023-01-01T00:00:00Z", "2023-01-01T00:00:00Z");
    shoes.image = "http://127.0.0.1:9/broken.jpeg".into();
    load(&mut app, &tx, vec![shoes.clone()]);

    let lines: Vec<String> = card_lines(&app, &shoes, 200).iter().map(line_text).collect();
    assert!(lines.contains(&"http://127.0.0.1:9/broken.jpeg".to_string()));

    let generation = app.probe_generation;
    assert!(app.apply_image_status(generation, 7, ImageStatus::Failed));
    let lines: Vec<String> = card_lines(&app, &shoes, 200).iter().map(line_text).collect();
    assert!(lines.contains(&PLACEHOLDER_IMAGE.to_string()));
    assert!(!lines.contains(&"http://127.0.0.1:9/broken.jpeg".to_string()));
}
