//! Experimental feature configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use super::{CLOUD_INTEGRATIONS_GITHUB_ENABLED, FlagSource};

/// Configuration of the experimental feature flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "camelCase")]
pub struct ExperimentalConfig {
    /// Allow GitHub to authenticate through the cloud integrations broker
    #[cfg_attr(
        feature = "config",
        arg(
            long = "experimental-cloud-github",
            env = "GITLENS_EXPERIMENTAL_CLOUD_INTEGRATIONS_GITHUB_ENABLED"
        )
    )]
    #[serde(default)]
    pub cloud_integrations_github_enabled: bool,
}

impl ExperimentalConfig {
    /// Returns every flag this configuration defines, keyed by flag name.
    pub fn flags(&self) -> [(&'static str, bool); 1] {
        [(
            CLOUD_INTEGRATIONS_GITHUB_ENABLED,
            self.cloud_integrations_github_enabled,
        )]
    }

    /// Enables or disables GitHub cloud integrations.
    pub fn with_cloud_integrations_github(mut self, enabled: bool) -> Self {
        self.cloud_integrations_github_enabled = enabled;
        self
    }
}

impl FlagSource for ExperimentalConfig {
    fn get(&self, flag: &str, default: bool) -> bool {
        self.flags()
            .into_iter()
            .find_map(|(name, value)| (name == flag).then_some(value))
            .unwrap_or(default)
    }
}
