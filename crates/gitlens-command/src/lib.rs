#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod bridge;
mod deferred;
#[cfg(any(test, feature = "test-utils"))]
mod mock;

pub mod args;
pub mod request;

pub use args::{BrowseOptions, BrowseRepoAtRevisionArgs, GitCommand, GitCommandArgs};
pub use bridge::CommandBridge;
pub use deferred::{Deferred, Promise};
pub use gitlens_core::{Error, ErrorKind, Result};
#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockExecutor;
pub use request::{CommandPayload, CommandRequest, CommandTarget, Commands};

/// Tracing target for command dispatch.
pub const TRACING_TARGET: &str = "gitlens_command::bridge";

/// Host capability that runs registered commands.
///
/// Implement this trait to connect the bridge to a command registry.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Dispatches `request` and returns the command's immediate result.
    ///
    /// Resolving means the command was dispatched, not that it finished. An
    /// unregistered command or a handler failure is returned as an error.
    async fn execute(&self, request: CommandRequest) -> Result<serde_json::Value>;
}
