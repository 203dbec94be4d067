use crate::api::{image_source, probe_image, CategoryClient, Category, FetchResult, ImageStatus};
use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::state::{Phase, ViewMode, ViewState};
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::{catch_task_panic, TimeDisplay};
use futures::StreamExt;
use ratatui::style::Style;
use std::borrow::Cow;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Upper bound on simultaneous image requests.
pub const MAX_CONCURRENT_PROBES: usize = 4;

/// Longest filter the input box accepts.
pub const MAX_FILTER_LEN: usize = 256;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// Number of frames in the loading spinner animation.
pub const SPINNER_FRAMES: usize = 10;

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A categories fetch settled.
    ///
    /// `generation` is the value of `fetch_generation` when the fetch was
    /// spawned; results from superseded fetches are dropped.
    CategoriesFetched { generation: u64, result: FetchResult },
    /// One image probe finished.
    ImageProbed {
        generation: u64,
        category_id: i64,
        status: ImageStatus,
    },
    /// A background task panicked.
    ///
    /// `generation` is the fetch or probe generation the task was spawned
    /// with, so a panic from a superseded task cannot settle the current one.
    TaskPanicked {
        task: &'static str,
        generation: u64,
        error: String,
    },
}

/// View-model for the categories screen.
pub struct App {
    pub client: CategoryClient,

    /// Everything the renderer draws from. Replaced on every transition.
    pub state: ViewState,

    /// Explicit retries since the last successful load.
    pub retry_count: u32,

    /// Bumped on every `load()`. Only the newest fetch may settle the state.
    pub fetch_generation: u64,
    pub fetch_handle: Option<JoinHandle<()>>,

    /// Bumped whenever a new batch of image probes starts.
    pub probe_generation: u64,
    pub probe_handle: Option<JoinHandle<()>>,

    /// Load status per category id. Missing entries read as `Loading`.
    pub image_status: HashMap<i64, ImageStatus>,

    /// Cursor into the visible (filtered) list.
    pub selected: usize,

    /// Keystrokes go to the filter box.
    pub filter_mode: bool,

    pub time_display: TimeDisplay,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    /// Transient status line text and when it was set.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    pub spinner_frame: usize,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,
}

impl App {
    pub fn new(client: CategoryClient, view_mode: ViewMode) -> Self {
        Self {
            client,
            state: ViewState::mounted(view_mode),
            retry_count: 0,
            fetch_generation: 0,
            fetch_handle: None,
            probe_generation: 0,
            probe_handle: None,
            image_status: HashMap::new(),
            selected: 0,
            filter_mode: false,
            time_display: TimeDisplay::default(),
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            spinner_frame: 0,
            needs_redraw: true,
        }
    }

    /// Apply display settings and keybinding overrides from a loaded config.
    ///
    /// Returns keybinding warnings for the caller to surface.
    pub fn apply_config(&mut self, config: &Config) -> Vec<String> {
        self.set_theme(config.theme_variant());
        self.time_display = config.time_display();
        self.set_view_mode(config.initial_view_mode());
        self.keybindings.apply_overrides(&config.keybindings)
    }

    /// Swap in the next state. All `ViewState` changes go through here.
    fn transition(&mut self, f: impl FnOnce(ViewState) -> ViewState) {
        let current = std::mem::take(&mut self.state);
        self.state = f(current);
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Fetch lifecycle
    // ------------------------------------------------------------------------

    /// Start a fetch. Any fetch already in flight is aborted and its result
    /// would be ignored anyway, so the last request always wins.
    pub fn load(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous categories fetch");
        }

        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        let generation = self.fetch_generation;
        self.transition(ViewState::begin_load);

        tracing::debug!(generation, url = %self.client.categories_url(), "Spawning categories fetch");
        self.fetch_handle = Some(spawn_fetch(
            self.client.clone(),
            generation,
            event_tx.clone(),
        ));
    }

    /// Count an explicit retry, then load again.
    pub fn retry(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.retry_count = self.retry_count.saturating_add(1);
        tracing::info!(retry_count = self.retry_count, "Retrying categories fetch");
        self.load(event_tx);
    }

    /// Reload regardless of the current state.
    pub fn refresh(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        self.set_status("Refreshing categories...");
        self.load(event_tx);
    }

    /// Settle a fetch. Returns false when the result was stale and dropped.
    pub fn apply_fetch(
        &mut self,
        generation: u64,
        result: FetchResult,
        event_tx: &mpsc::Sender<AppEvent>,
    ) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(
                generation,
                current = self.fetch_generation,
                "Discarding stale categories result"
            );
            return false;
        }
        self.fetch_handle = None;

        let success = result.is_success();
        self.transition(|s| s.settle(result));

        if success {
            self.retry_count = 0;
            self.clamp_selection();
            tracing::info!(count = self.state.categories.len(), "Categories loaded");
            self.start_image_probes(event_tx);
        }
        true
    }

    /// Probe every category image, replacing any batch still running.
    fn start_image_probes(&mut self, event_tx: &mpsc::Sender<AppEvent>) {
        if let Some(handle) = self.probe_handle.take() {
            handle.abort();
        }
        self.probe_generation = self.probe_generation.wrapping_add(1);

        self.image_status = self
            .state
            .categories
            .iter()
            .map(|c| (c.id, ImageStatus::Loading))
            .collect();

        let targets: Vec<(i64, String)> = self
            .state
            .categories
            .iter()
            .map(|c| (c.id, c.image.clone()))
            .collect();
        if targets.is_empty() {
            return;
        }

        self.probe_handle = Some(spawn_image_probes(
            targets,
            self.probe_generation,
            self.client.http().clone(),
            self.client.timeout(),
            event_tx.clone(),
        ));
    }

    /// Record one probe result. Returns false for results from an old batch.
    pub fn apply_image_status(
        &mut self,
        generation: u64,
        category_id: i64,
        status: ImageStatus,
    ) -> bool {
        if generation != self.probe_generation {
            return false;
        }
        self.image_status.insert(category_id, status);
        true
    }

    pub fn image_status_for(&self, category_id: i64) -> ImageStatus {
        self.image_status
            .get(&category_id)
            .copied()
            .unwrap_or_default()
    }

    /// Image URL to display for a category, placeholder if its load failed.
    pub fn image_src<'a>(&self, category: &'a Category) -> &'a str {
        image_source(&category.image, self.image_status_for(category.id))
    }

    /// Label for the retry control.
    pub fn retry_label(&self) -> String {
        match self.retry_count {
            0 => "Retry".to_string(),
            n => format!("Retry ({})", n),
        }
    }

    // ------------------------------------------------------------------------
    // View mode and filter
    // ------------------------------------------------------------------------

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.transition(|s| s.with_view_mode(mode));
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        let next = self.state.view_mode.toggle();
        self.set_view_mode(next);
        next
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        let mut text: String = text.into();
        if let Some((idx, _)) = text.char_indices().nth(MAX_FILTER_LEN) {
            text.truncate(idx);
        }
        self.transition(|s| s.with_filter(text));
        self.clamp_selection();
    }

    pub fn push_filter_char(&mut self, c: char) {
        if c.is_control() || self.state.filter_text.chars().count() >= MAX_FILTER_LEN {
            return;
        }
        let mut text = self.state.filter_text.clone();
        text.push(c);
        self.set_filter(text);
    }

    pub fn pop_filter_char(&mut self) {
        let mut text = self.state.filter_text.clone();
        if text.pop().is_some() {
            self.set_filter(text);
        }
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.needs_redraw = true;
    }

    /// Leave the filter box, keeping its text.
    pub fn commit_filter(&mut self) {
        self.filter_mode = false;
        self.needs_redraw = true;
    }

    /// Leave the filter box and drop its text.
    pub fn clear_filter(&mut self) {
        self.filter_mode = false;
        self.set_filter(String::new());
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    fn visible_len(&self) -> usize {
        match self.state.phase() {
            Phase::Loaded => self.state.visible_categories().len(),
            Phase::Loading | Phase::Failed(_) => 0,
        }
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible_len().saturating_sub(1));
    }

    pub fn nav_down(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = self.selected.saturating_add(1).min(len - 1);
        }
    }

    pub fn nav_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_category(&self) -> Option<&Category> {
        match self.state.phase() {
            Phase::Loaded => self.state.visible_categories().get(self.selected).copied(),
            Phase::Loading | Phase::Failed(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Chrome
    // ------------------------------------------------------------------------

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant, returning its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once it is 3 seconds old.
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    /// Advance the spinner while a fetch is pending.
    pub fn tick(&mut self) {
        if self.state.loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES;
            self.needs_redraw = true;
        }
    }
}

/// Abort in-flight tasks when the view goes away so nothing settles into a
/// dropped state.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted categories fetch on App drop");
        }
        if let Some(handle) = self.probe_handle.take() {
            handle.abort();
            tracing::debug!("Aborted image probes on App drop");
        }
    }
}

// ============================================================================
// Background tasks
// ============================================================================

/// Fetch categories in the background and report through `tx`.
fn spawn_fetch(
    client: CategoryClient,
    generation: u64,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let tx_panic = tx.clone();
        let outcome = catch_task_panic(async {
            let result = client.fetch_categories().await;
            if let Err(e) = tx
                .send(AppEvent::CategoriesFetched { generation, result })
                .await
            {
                tracing::warn!(error = %e, event = "CategoriesFetched", "Channel send failed (receiver dropped)");
            }
        })
        .await;

        if let Err(panic_msg) = outcome {
            tracing::error!(task = "fetch_categories", error = %panic_msg, "Background task panicked");
            let _ = tx_panic
                .send(AppEvent::TaskPanicked {
                    task: "fetch_categories",
                    generation,
                    error: panic_msg,
                })
                .await;
        }
    })
}

/// Probe category images, at most `MAX_CONCURRENT_PROBES` at a time.
///
/// Each result is sent as soon as it is known so cards update progressively.
fn spawn_image_probes(
    targets: Vec<(i64, String)>,
    generation: u64,
    http: reqwest::Client,
    timeout: Duration,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let tx_panic = tx.clone();
        let outcome = catch_task_panic(async {
            let total = targets.len();
            let probes = futures::stream::iter(targets)
                .map(|(category_id, url)| {
                    let http = http.clone();
                    async move { (category_id, probe_image(&http, &url, timeout).await) }
                })
                .buffer_unordered(MAX_CONCURRENT_PROBES);
            futures::pin_mut!(probes);

            while let Some((category_id, status)) = probes.next().await {
                let event = AppEvent::ImageProbed {
                    generation,
                    category_id,
                    status,
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!("Receiver dropped, stopping image probes");
                    return;
                }
            }
            tracing::debug!(total, generation, "Image probes complete");
        })
        .await;

        if let Err(panic_msg) = outcome {
            tracing::error!(task = "image_probes", error = %panic_msg, "Background task panicked");
            let _ = tx_panic
                .send(AppEvent::TaskPanicked {
                    task: "image_probes",
                    generation,
                    error: panic_msg,
                })
                .await;
        }
    })
}
