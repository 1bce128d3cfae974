//! Preference state holder and its address-bar mirror.

use super::{reduce, PreferenceAction, Preferences};
use url::Url;

/// Side effects a preference change has on its host.
///
/// In a browser this is `history.replaceState` plus `scrollTo(0, 0)`; the
/// CLI and tests supply their own.
pub trait ViewEnvironment {
    /// Current query string (without `?`), used once at mount.
    fn current_query(&self) -> String;

    /// Rewrite the visible query string in place. Must not add a history
    /// entry.
    fn replace_query(&mut self, query: &str);

    /// Bring the top of the view into sight.
    fn scroll_to_top(&mut self) {}
}

/// Environment backed by a real URL.
///
/// Tracks how many history entries have been created so callers can check
/// that preference changes only ever replace the current one.
#[derive(Debug, Clone)]
pub struct UrlEnvironment {
    current: Url,
    history_len: usize,
    scroll_requests: usize,
}

impl UrlEnvironment {
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            current: url,
            history_len: 1,
            scroll_requests: 0,
        }
    }

    /// The URL currently shown.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.current
    }

    #[must_use]
    pub const fn history_len(&self) -> usize {
        self.history_len
    }

    #[must_use]
    pub const fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }
}

impl ViewEnvironment for UrlEnvironment {
    fn current_query(&self) -> String {
        self.current.query().unwrap_or_default().to_string()
    }

    fn replace_query(&mut self, query: &str) {
        self.current.set_query(Some(query));
    }

    fn scroll_to_top(&mut self) {
        self.scroll_requests += 1;
    }
}

/// Environment that records every effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingEnvironment {
    pub initial_query: String,
    pub replaced: Vec<String>,
    pub scrolls: usize,
}

impl RecordingEnvironment {
    #[must_use]
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            initial_query: query.into(),
            ..Self::default()
        }
    }

    /// Most recent query written, falling back to the initial one.
    #[must_use]
    pub fn last_query(&self) -> &str {
        self.replaced.last().map_or(self.initial_query.as_str(), String::as_str)
    }
}

impl ViewEnvironment for RecordingEnvironment {
    fn current_query(&self) -> String {
        self.last_query().to_string()
    }

    fn replace_query(&mut self, query: &str) {
        self.replaced.push(query.to_string());
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }
}

/// Owns the current preferences and mirrors every transition to its
/// environment.
///
/// The mirror always serializes the state being committed, never a value
/// captured earlier, so the address bar cannot lag behind.
#[derive(Debug)]
pub struct PreferenceStore<E: ViewEnvironment> {
    preferences: Preferences,
    environment: E,
    revision: u64,
}

impl<E: ViewEnvironment> PreferenceStore<E> {
    /// Initialise from the environment's current query and write back its
    /// normalized form.
    pub fn mount(environment: E) -> Self {
        let preferences = Preferences::from_query(&environment.current_query());
        let mut store = Self {
            preferences,
            environment,
            revision: 0,
        };
        store.mirror();
        store
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    #[must_use]
    pub const fn environment(&self) -> &E {
        &self.environment
    }

    pub fn into_environment(self) -> E {
        self.environment
    }

    /// Number of committed transitions since mount.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the preferences wholesale.
    pub fn set(&mut self, preferences: Preferences) {
        self.commit(preferences);
    }

    /// Derive the next preferences from the current ones.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&Preferences) -> Preferences,
    {
        let next = f(&self.preferences);
        self.commit(next);
    }

    pub fn dispatch(&mut self, action: PreferenceAction) {
        let is_reset = matches!(action, PreferenceAction::Reset);
        let next = reduce(&self.preferences, action);
        self.commit(next);
        if is_reset {
            self.environment.scroll_to_top();
        }
    }

    /// Restore defaults except grouping, then scroll to the top.
    pub fn reset(&mut self) {
        self.dispatch(PreferenceAction::Reset);
    }

    fn commit(&mut self, next: Preferences) {
        self.preferences = next;
        self.revision += 1;
        self.mirror();
    }

    fn mirror(&mut self) {
        let query = self.preferences.to_query_string();
        tracing::debug!(revision = self.revision, query = %query, "Mirroring preferences to URL");
        self.environment.replace_query(&query);
    }
}
