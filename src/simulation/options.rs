//! Options carried by containers and merged down the composition tree
//!
//! Merging is a flat override: the more specific side wins for the window,
//! and labels are merged key by key with the more specific side winning.

use chrono::Duration;
use std::collections::BTreeMap;

/// Domain labels stamped onto generated events
pub type Labels = BTreeMap<String, String>;

/// Named options for actors and containers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Custom window duration
    pub window: Option<Duration>,
    /// Domain labels
    pub labels: Labels,
}

impl Options {
    /// Empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a window
    pub fn with_window(window: Duration) -> Self {
        Self { window: Some(window), labels: Labels::new() }
    }

    /// Set the window
    pub fn window(mut self, window: Duration) -> Self {
        self.window = Some(window);
        self
    }

    /// Add one label
    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add several labels
    pub fn labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Merge `self` over `base`: values set on `self` win on conflict
    pub fn merged_over(&self, base: &Options) -> Options {
        let mut labels = base.labels.clone();
        labels.extend(self.labels.iter().map(|(k, v)| (k.clone(), v.clone())));

        Options { window: self.window.or(base.window), labels }
    }

    /// Copy of these options with the window removed
    pub fn without_window(&self) -> Options {
        Options { window: None, labels: self.labels.clone() }
    }

    /// Whether nothing is set
    pub fn is_empty(&self) -> bool {
        self.window.is_none() && self.labels.is_empty()
    }
}
