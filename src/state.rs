//! Explicit view state for the categories screen.
//!
//! `ViewState` is a value object. Every transition consumes the old state and
//! returns a new one, so the renderer only ever sees a complete, consistent
//! snapshot and tests can drive transitions without a terminal or network.

use crate::api::{Category, FetchResult};
use std::sync::Arc;

/// Shortest non-empty filter that is considered a real search.
pub const MIN_FILTER_LEN: usize = 2;

/// How the category list is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    /// Parse a mode name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "cards" | "card" => Some(Self::Cards),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }
}

/// Which of the three mutually exclusive screens to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    Loading,
    Failed(&'a str),
    Loaded,
}

/// Everything the categories screen renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Categories in server order. Arc so snapshots share the list.
    pub categories: Arc<Vec<Category>>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub filter_text: String,
    pub view_mode: ViewMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::mounted(ViewMode::default())
    }
}

impl ViewState {
    /// Initial state on mount: loading, nothing fetched yet.
    pub fn mounted(view_mode: ViewMode) -> Self {
        Self {
            categories: Arc::new(Vec::new()),
            loading: true,
            error_message: None,
            filter_text: String::new(),
            view_mode,
        }
    }

    /// A fetch is starting. Prior errors are cleared; data is kept.
    pub fn begin_load(self) -> Self {
        Self {
            loading: true,
            error_message: None,
            ..self
        }
    }

    /// A fetch has settled.
    ///
    /// `loading` is cleared on both paths. A failure keeps the previously
    /// loaded categories so a later success is not required to see them again.
    pub fn settle(self, result: FetchResult) -> Self {
        match result {
            FetchResult::Success { categories } => Self {
                categories: Arc::new(categories),
                loading: false,
                error_message: None,
                ..self
            },
            FetchResult::Failure { message, .. } => Self {
                loading: false,
                error_message: Some(message),
                ..self
            },
        }
    }

    pub fn with_filter(self, filter_text: impl Into<String>) -> Self {
        Self {
            filter_text: filter_text.into(),
            ..self
        }
    }

    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        Self { view_mode, ..self }
    }

    /// Which top-level screen applies. Loading wins over a stale error.
    pub fn phase(&self) -> Phase<'_> {
        if self.loading {
            Phase::Loading
        } else if let Some(msg) = &self.error_message {
            Phase::Failed(msg)
        } else {
            Phase::Loaded
        }
    }

    pub fn has_filter(&self) -> bool {
        !self.filter_text.is_empty()
    }

    /// False only for a one-character filter.
    pub fn filter_valid(&self) -> bool {
        let len = self.filter_text.chars().count();
        len == 0 || len >= MIN_FILTER_LEN
    }

    /// Categories whose name contains the filter, ignoring case, in source order.
    pub fn filtered_categories(&self) -> Vec<&Category> {
        let needle = self.filter_text.to_lowercase();
        if needle.is_empty() {
            return self.categories.iter().collect();
        }
        self.categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// The rows to draw. An invalid filter suppresses the list entirely.
    pub fn visible_categories(&self) -> Vec<&Category> {
        if self.filter_valid() {
            self.filtered_categories()
        } else {
            Vec::new()
        }
    }

    /// True when a real search matched nothing.
    pub fn shows_no_results(&self) -> bool {
        self.has_filter() && self.filter_valid() && self.filtered_categories().is_empty()
    }
}
