//! Keybinding registry: maps keys to actions per context, with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    Refresh,
    Retry,
    EnterFilter,
    ClearFilter,
    CommitFilter,
    ToggleView,
    TableView,
    CardsView,
    OpenImage,
    CycleTheme,
    ShowHelp,
    Back,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Select next category",
            Self::NavUp => "Select previous category",
            Self::Refresh => "Reload categories",
            Self::Retry => "Retry failed request",
            Self::EnterFilter => "Filter by name",
            Self::ClearFilter => "Clear filter",
            Self::CommitFilter => "Keep filter and return to list",
            Self::ToggleView => "Toggle table / cards",
            Self::TableView => "Table view",
            Self::CardsView => "Cards view",
            Self::OpenImage => "Open image in browser",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
            Self::Back => "Clear filter / dismiss",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Active everywhere except while typing a filter.
    Global,
    /// Category list is showing.
    Browse,
    /// The error panel is showing.
    Error,
    /// Typing into the filter box. No fallback to Global.
    Filter,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Browse => "List",
            Self::Error => "Error",
            Self::Filter => "Filter",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Shifted letters arrive with SHIFT set on some terminals; bindings are stored without it.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) => Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT)),
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Accepts single characters ("q", "/"), named keys ("Enter", "Esc", "Tab",
/// "Up", "Down", "Backspace", "Space"), "Ctrl+<char>" and "F1".."F12".
pub fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+").or_else(|| s.strip_prefix("ctrl+")) {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(num) = s.strip_prefix('F').or_else(|| s.strip_prefix('f')) {
        if let Ok(n) = num.parse::<u8>() {
            return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec for the help screen.
pub fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Default bindings, in help-screen order.
const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    (Context::Global, KeySpec::ch('q'), Action::Quit),
    (Context::Global, KeySpec::ctrl('c'), Action::Quit),
    (Context::Global, KeySpec::ch('?'), Action::ShowHelp),
    (Context::Global, KeySpec::ch('T'), Action::CycleTheme),
    (Context::Global, KeySpec::ch('v'), Action::ToggleView),
    (Context::Global, KeySpec::ch('1'), Action::TableView),
    (Context::Global, KeySpec::ch('2'), Action::CardsView),
    (Context::Global, KeySpec::ch('/'), Action::EnterFilter),
    (Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back),
    (Context::Browse, KeySpec::ch('j'), Action::NavDown),
    (Context::Browse, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Browse, KeySpec::ch('k'), Action::NavUp),
    (Context::Browse, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Browse, KeySpec::ch('r'), Action::Refresh),
    (Context::Browse, KeySpec::ch('o'), Action::OpenImage),
    (Context::Error, KeySpec::ch('r'), Action::Retry),
    (Context::Error, KeySpec::plain(KeyCode::Enter), Action::Retry),
    (Context::Filter, KeySpec::plain(KeyCode::Esc), Action::ClearFilter),
    (Context::Filter, KeySpec::plain(KeyCode::Enter), Action::CommitFilter),
    (Context::Filter, KeySpec::plain(KeyCode::Down), Action::CommitFilter),
];

/// Registry of keybindings with context-aware lookup.
///
/// The same key can map to different actions in different contexts; `r`
/// reloads from the list but retries from the error panel.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::with_capacity(DEFAULT_BINDINGS.len()),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Apply user overrides from the config `[keybindings]` table.
    ///
    /// Keys are action names ("quit", "toggle_view"), values are key strings
    /// ("q", "Ctrl+d", "F5"). The new key replaces every default key for that
    /// action, in every context the action was bound in.
    ///
    /// Returns warnings for unknown action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so repeated runs apply (and warn) in the same order
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key, falling back to Global.
    ///
    /// The Filter context never falls back: typed characters belong to the
    /// filter text, not to global shortcuts.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        match context {
            Context::Global | Context::Filter => None,
            Context::Browse | Context::Error => {
                self.lookup.get(&(Context::Global, key)).copied()
            }
        }
    }

    /// Every binding as (context, key label, action, description), for the help screen.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name from config.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "down" => Some(Action::NavDown),
        "nav_up" | "up" => Some(Action::NavUp),
        "refresh" | "reload" => Some(Action::Refresh),
        "retry" => Some(Action::Retry),
        "filter" | "enter_filter" | "search" => Some(Action::EnterFilter),
        "clear_filter" => Some(Action::ClearFilter),
        "commit_filter" => Some(Action::CommitFilter),
        "toggle_view" | "view" => Some(Action::ToggleView),
        "table_view" | "table" => Some(Action::TableView),
        "cards_view" | "cards" => Some(Action::CardsView),
        "open_image" | "open" => Some(Action::OpenImage),
        "cycle_theme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "help" => Some(Action::ShowHelp),
        "back" => Some(Action::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(reg: &KeybindingRegistry, c: char, ctx: Context) -> Option<Action> {
        reg.action_for_key(KeyCode::Char(c), KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, 'q', Context::Global), Some(Action::Quit));
        assert_eq!(
            reg.action_for_key(KeyCode::Char('c'), KeyModifiers::CONTROL, Context::Browse),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_r_depends_on_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, 'r', Context::Browse), Some(Action::Refresh));
        assert_eq!(key(&reg, 'r', Context::Error), Some(Action::Retry));
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Error),
            Some(Action::Retry)
        );
    }

    #[test]
    fn test_browse_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, 'v', Context::Browse), Some(Action::ToggleView));
        assert_eq!(key(&reg, '2', Context::Error), Some(Action::CardsView));
    }

    #[test]
    fn test_filter_context_does_not_fall_back() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, 'q', Context::Filter), None);
        assert_eq!(key(&reg, 'v', Context::Filter), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Esc, KeyModifiers::NONE, Context::Filter),
            Some(Action::ClearFilter)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Filter),
            Some(Action::CommitFilter)
        );
    }

    #[test]
    fn test_shifted_char_matches() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Browse),
            Some(Action::CycleTheme)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::F(12), KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_apply_overrides_replaces_key_in_all_contexts() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nav_down".to_string(), "n".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());
        assert_eq!(key(&reg, 'n', Context::Browse), Some(Action::NavDown));
        assert_eq!(key(&reg, 'j', Context::Browse), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Down, KeyModifiers::NONE, Context::Browse),
            None
        );
    }

    #[test]
    fn test_apply_overrides_ctrl() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        assert!(reg.apply_overrides(&overrides).is_empty());
        assert_eq!(key(&reg, 'q', Context::Global), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nonexistent_action".to_string(), "q".to_string());
        overrides.insert("quit".to_string(), "Ctrl+Alt+Q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Unknown action"));
        assert!(warnings[1].contains("Cannot parse key"));
        // Failed override leaves the default alone
        assert_eq!(key(&reg, 'q', Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("/"), Some(KeySpec::ch('/')));
        assert_eq!(parse_key_string("é"), Some(KeySpec::ch('é')));
        assert_eq!(parse_key_string("qq"), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('q')), "q");
        assert_eq!(format_key(&KeySpec::ctrl('c')), "Ctrl+c");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Enter)), "Enter");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
    }

    #[test]
    fn test_all_bindings_cover_every_action() {
        let reg = KeybindingRegistry::new();
        let bound: Vec<Action> = reg.all_bindings().iter().map(|b| b.2).collect();
        for action in [
            Action::Quit,
            Action::NavDown,
            Action::NavUp,
            Action::Refresh,
            Action::Retry,
            Action::EnterFilter,
            Action::ClearFilter,
            Action::CommitFilter,
            Action::ToggleView,
            Action::TableView,
            Action::CardsView,
            Action::OpenImage,
            Action::CycleTheme,
            Action::ShowHelp,
            Action::Back,
        ] {
            assert!(bound.contains(&action), "{:?} has no default key", action);
        }
    }
}
