//! Recording command executor for tests.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! gitlens-command = { version = "...", features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::{CommandExecutor, CommandRequest, Error, ErrorKind, Result};

/// How the mock reacts to a dispatch.
#[derive(Debug, Clone, Copy, Default)]
enum Behavior {
    /// Record the request and leave any completion token untouched.
    #[default]
    Record,
    /// Record the request and resolve its completion token right away.
    Complete,
    /// Record the request and fail the dispatch.
    Fail(ErrorKind),
}

/// Command executor that records every request it receives.
///
/// Clones share the same recorded requests.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<CommandRequest>>>,
}

impl MockExecutor {
    /// Creates an executor that records requests and leaves tokens unsettled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an executor that resolves completion tokens during dispatch.
    pub fn completing() -> Self {
        Self {
            behavior: Behavior::Complete,
            ..Self::default()
        }
    }

    /// Creates an executor whose dispatches fail with `kind`.
    pub fn failing(kind: ErrorKind) -> Self {
        Self {
            behavior: Behavior::Fail(kind),
            ..Self::default()
        }
    }

    /// Returns every request dispatched so far.
    pub fn requests(&self) -> Vec<CommandRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of requests dispatched so far.
    pub fn dispatch_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, request: CommandRequest) -> Result<serde_json::Value> {
        let command = request.command;
        let completion = request.completion().cloned();

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match self.behavior {
            Behavior::Record => {}
            Behavior::Complete => {
                if let Some(completion) = completion {
                    completion.resolve(());
                }
            }
            Behavior::Fail(kind) => {
                return Err(Error::new(kind).with_message(format!("command '{command}' failed")));
            }
        }

        Ok(serde_json::Value::Null)
    }
}
