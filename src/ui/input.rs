//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry in the context that
//! matches what is on screen: the filter box, the error panel, or the list.

use crate::app::{App, AppEvent};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::state::{Phase, ViewMode};
use crate::util::validate_http_url;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Which binding context applies to the current screen.
fn current_context(app: &App) -> KbContext {
    if app.filter_mode {
        return KbContext::Filter;
    }
    match app.state.phase() {
        Phase::Loaded => KbContext::Browse,
        Phase::Failed(_) => KbContext::Error,
        Phase::Loading => KbContext::Global,
    }
}

/// Main input dispatch function.
pub fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.filter_mode {
        return handle_filter_input(app, code, modifiers);
    }

    let context = current_context(app);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ToggleView => {
            let mode = app.toggle_view_mode();
            app.set_status(format!("View: {}", mode.name()));
        }
        KbAction::TableView => app.set_view_mode(ViewMode::Table),
        KbAction::CardsView => app.set_view_mode(ViewMode::Cards),
        KbAction::EnterFilter => {
            // The filter box only exists once the list is showing
            if context == KbContext::Browse {
                app.enter_filter_mode();
            }
        }
        KbAction::Back => {
            if app.state.has_filter() {
                app.clear_filter();
            }
        }
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::Refresh => app.refresh(event_tx),
        KbAction::Retry => app.retry(event_tx),
        KbAction::OpenImage => open_selected_image(app),
        KbAction::ClearFilter | KbAction::CommitFilter => {}
    }

    Action::Continue
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while typing in the filter box.
///
/// Bound keys (Esc, Enter) act; everything printable is filter text.
fn handle_filter_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Filter)
    {
        Some(KbAction::ClearFilter) => app.clear_filter(),
        Some(KbAction::CommitFilter) => app.commit_filter(),
        Some(_) => {}
        None => match code {
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_filter_char(c)
            }
            _ => {}
        },
    }
    Action::Continue
}

/// Open the selected category's image (or the placeholder) in the browser.
fn open_selected_image(app: &mut App) {
    let Some(category) = app.selected_category() else {
        return;
    };
    let name = category.name.clone();
    let src = app.image_src(category).to_string();

    // Validate before open::that() so file:// and custom schemes never launch
    match validate_http_url(&src) {
        Err(e) => app.set_status(format!("Cannot open image: {}", e)),
        Ok(url) => match open::that(url.as_str()) {
            Ok(()) => app.set_status(format!("Opening image for {}...", name)),
            Err(e) => app.set_status(format!("Failed to open browser: {}", e)),
        },
    }
}
