//! Reloadable in-memory flag store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use super::{ExperimentalConfig, FlagSource, TRACING_TARGET};

/// Cloneable flag store whose values can change while it is being read.
///
/// Clones share the same underlying values, so a host can hand one clone to
/// consumers and keep another to apply configuration reloads.
#[derive(Clone, Default)]
pub struct LiveFlags {
    values: Arc<RwLock<HashMap<String, bool>>>,
}

impl fmt::Debug for LiveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("LiveFlags")
            .field("values", &*values)
            .finish()
    }
}

impl LiveFlags {
    /// Creates an empty flag store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag store seeded from the experimental configuration.
    pub fn from_config(config: &ExperimentalConfig) -> Self {
        let flags = Self::new();
        flags.reload(config);
        flags
    }

    /// Sets `flag` to `value`.
    pub fn set(&self, flag: impl Into<String>, value: bool) {
        let flag = flag.into();
        tracing::debug!(target: TRACING_TARGET, flag = %flag, value, "Flag updated");

        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(flag, value);
    }

    /// Removes `flag`, so reads fall back to their default.
    pub fn unset(&self, flag: &str) -> Option<bool> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(flag)
    }

    /// Replaces every flag the configuration defines with its current value.
    pub fn reload(&self, config: &ExperimentalConfig) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        for (flag, value) in config.flags() {
            values.insert(flag.to_owned(), value);
        }

        tracing::info!(
            target: TRACING_TARGET,
            flag_count = values.len(),
            "Feature flags reloaded"
        );
    }
}

impl FlagSource for LiveFlags {
    fn get(&self, flag: &str, default: bool) -> bool {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(flag).copied().unwrap_or(default)
    }
}
