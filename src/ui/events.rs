//! Application event handling.
//!
//! Processes background task completions: fetch results, image probe
//! results and task panics.

use crate::api::{FailureReason, FetchResult, MSG_UNKNOWN};
use crate::app::{App, AppEvent};
use tokio::sync::mpsc;

/// Handle one event from a background task.
pub fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::CategoriesFetched { generation, result } => {
            let reason = result.reason();
            if !app.apply_fetch(generation, result, event_tx) {
                return;
            }
            match reason {
                None => {
                    let count = app.state.categories.len();
                    app.set_status(format!("Loaded {} categories", count));
                }
                Some(reason) => {
                    tracing::warn!(?reason, retry_count = app.retry_count, "Categories fetch failed");
                }
            }
        }

        AppEvent::ImageProbed {
            generation,
            category_id,
            status,
        } => {
            if app.apply_image_status(generation, category_id, status) {
                app.needs_redraw = true;
            }
        }

        AppEvent::TaskPanicked {
            task,
            generation,
            error,
        } => {
            tracing::error!(task, generation, error = %error, "Background task panicked");

            // The fetch will never report back, so settle it here. Panics
            // from a superseded fetch are only logged.
            if task == "fetch_categories" {
                if generation != app.fetch_generation {
                    return;
                }
                if app.state.loading {
                    app.apply_fetch(
                        generation,
                        FetchResult::Failure {
                            reason: FailureReason::UnknownError,
                            message: MSG_UNKNOWN.to_string(),
                        },
                        event_tx,
                    );
                }
            }
            app.set_status(format!("Internal error in {}", task));
        }
    }
}
