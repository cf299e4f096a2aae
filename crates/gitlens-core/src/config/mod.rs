//! Feature-flag access and experimental configuration.
//!
//! Consumers read flags through the [`FlagSource`] capability and never cache
//! the result, which keeps live configuration reloads visible to the next
//! read.

mod experimental;
mod live;

use std::sync::Arc;

pub use experimental::ExperimentalConfig;
pub use live::LiveFlags;

/// Tracing target for configuration operations.
pub const TRACING_TARGET: &str = "gitlens_core::config";

/// Flag enabling GitHub as a cloud integration.
pub const CLOUD_INTEGRATIONS_GITHUB_ENABLED: &str = "experimental.cloudIntegrations.github.enabled";

/// Synchronous, poll-on-demand source of boolean feature flags.
pub trait FlagSource: Send + Sync {
    /// Returns the current value of `flag`, or `default` when it is not set.
    fn get(&self, flag: &str, default: bool) -> bool;
}

impl<T> FlagSource for Arc<T>
where
    T: FlagSource + ?Sized,
{
    fn get(&self, flag: &str, default: bool) -> bool {
        (**self).get(flag, default)
    }
}

impl<T> FlagSource for &T
where
    T: FlagSource + ?Sized,
{
    fn get(&self, flag: &str, default: bool) -> bool {
        (**self).get(flag, default)
    }
}
