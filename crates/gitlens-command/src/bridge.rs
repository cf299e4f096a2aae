//! Command bridge with completion tracking and observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::args::{BrowseOptions, BrowseRepoAtRevisionArgs, GitCommandArgs};
use crate::{CommandExecutor, CommandRequest, Deferred, Result, TRACING_TARGET};

/// Runs host commands and waits for the ones that report completion.
///
/// The executor is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct CommandBridge {
    executor: Arc<dyn CommandExecutor>,
}

impl fmt::Debug for CommandBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBridge").finish_non_exhaustive()
    }
}

impl CommandBridge {
    /// Creates a bridge dispatching through `executor`.
    pub fn new<E>(executor: E) -> Self
    where
        E: CommandExecutor + 'static,
    {
        Self {
            executor: Arc::new(executor),
        }
    }

    /// Creates a bridge from an already shared executor.
    pub fn from_shared(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Runs the interactive git command wizard until it reports completion.
    ///
    /// Dispatch errors are returned as-is and the completion token is never
    /// settled. If the wizard never settles its token the returned future
    /// stays pending.
    pub async fn run_interactive(&self, args: GitCommandArgs) -> Result<()> {
        let completion = Deferred::new();
        let promise = completion.promise()?;
        let request = CommandRequest::new(args.with_completion(completion));
        let request_id = request.request_id;

        let started_at = Instant::now();
        self.dispatch(request).await?;

        let result = promise.await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET,
                request_id = %request_id,
                elapsed_ms = elapsed.as_millis(),
                "Interactive command completed"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET,
                request_id = %request_id,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Interactive command rejected its completion"
            ),
        }

        result
    }

    /// Opens the repository at the revision `uri` points at.
    ///
    /// Resolves as soon as the command is dispatched.
    pub async fn open_resource(&self, uri: Url, options: BrowseOptions) -> Result<()> {
        let request = CommandRequest::editor(None, BrowseRepoAtRevisionArgs::new(uri, options));
        self.dispatch(request).await?;
        Ok(())
    }

    async fn dispatch(&self, request: CommandRequest) -> Result<serde_json::Value> {
        let request_id = request.request_id;
        let command = request.command;
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            command = %command,
            has_completion = request.completion().is_some(),
            "Dispatching command"
        );

        let result = self.executor.execute(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(_) => tracing::debug!(
                target: TRACING_TARGET,
                request_id = %request_id,
                command = %command,
                elapsed_ms = elapsed.as_millis(),
                "Command dispatched"
            ),
            Err(error) => tracing::error!(
                target: TRACING_TARGET,
                request_id = %request_id,
                command = %command,
                error = %error,
                elapsed_ms = elapsed.as_millis(),
                "Command dispatch failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::args::GitCommand;
    use crate::mock::MockExecutor;
    use crate::request::{CommandPayload, CommandTarget, Commands};
    use crate::{Error, ErrorKind};

    async fn wait_for_dispatch(executor: &MockExecutor) {
        while executor.dispatch_count() == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_run_interactive_waits_for_completion() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());

        let handle = tokio::spawn(async move {
            bridge
                .run_interactive(GitCommandArgs::new(GitCommand::Pull))
                .await
        });
        wait_for_dispatch(&executor).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].command, Commands::GitCommands);
        assert_eq!(requests[0].target, CommandTarget::Workbench);

        let completion = requests[0].completion().unwrap();
        assert!(completion.resolve(()));
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_run_interactive_sends_args() {
        let executor = MockExecutor::completing();
        let bridge = CommandBridge::new(executor.clone());

        bridge
            .run_interactive(
                GitCommandArgs::new(GitCommand::Stash).with_state(json!({ "subcommand": "push" })),
            )
            .await
            .unwrap();

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        let CommandPayload::GitCommands(args) = &requests[0].payload else {
            panic!("unexpected payload: {:?}", requests[0].payload);
        };
        assert_eq!(args.args.command, Some(GitCommand::Stash));
        assert_eq!(args.args.state, Some(json!({ "subcommand": "push" })));
        assert!(args.completion.is_settled());
    }

    #[tokio::test]
    async fn test_run_interactive_double_resolve() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());

        let handle = tokio::spawn(async move {
            bridge.run_interactive(GitCommandArgs::default()).await
        });
        wait_for_dispatch(&executor).await;

        let requests = executor.requests();
        let completion = requests[0].completion().unwrap();
        assert!(completion.resolve(()));
        assert!(!completion.resolve(()));
        assert!(!completion.reject(Error::external_error()));

        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_run_interactive_rejected_completion() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());

        let handle = tokio::spawn(async move {
            bridge.run_interactive(GitCommandArgs::new(GitCommand::Push)).await
        });
        wait_for_dispatch(&executor).await;

        let requests = executor.requests();
        requests[0]
            .completion()
            .unwrap()
            .reject(Error::external_error().with_message("push rejected"));

        let error = handle.await.unwrap().unwrap_err();
        assert_eq!(error.kind, ErrorKind::ExternalError);
    }

    #[tokio::test]
    async fn test_run_interactive_dispatch_failure() {
        let executor = MockExecutor::failing(ErrorKind::NotFound);
        let bridge = CommandBridge::new(executor.clone());

        let error = bridge
            .run_interactive(GitCommandArgs::new(GitCommand::Fetch))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].completion().unwrap().is_settled());
    }

    #[tokio::test]
    async fn test_run_interactive_pending_without_completion() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());

        let waited = tokio::time::timeout(
            Duration::from_millis(20),
            bridge.run_interactive(GitCommandArgs::default()),
        )
        .await;

        assert!(waited.is_err());
        assert_eq!(executor.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_open_resource_without_options() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());
        let uri = Url::parse("gitlens://origin/repo/src/lib.rs?ref=4f2c1e").unwrap();

        bridge
            .open_resource(uri.clone(), BrowseOptions::default())
            .await
            .unwrap();

        let requests = executor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].command, Commands::BrowseRepoAtRevision);
        assert_eq!(requests[0].target, CommandTarget::Editor { uri: None });
        assert!(requests[0].completion().is_none());

        let CommandPayload::BrowseRepoAtRevision(args) = &requests[0].payload else {
            panic!("unexpected payload: {:?}", requests[0].payload);
        };
        assert_eq!(args.uri, uri);
        assert_eq!(args.before, None);
        assert_eq!(args.open_in_new_window, None);
    }

    #[tokio::test]
    async fn test_open_resource_with_options() {
        let executor = MockExecutor::new();
        let bridge = CommandBridge::new(executor.clone());
        let uri = Url::parse("file:///repo/Cargo.toml").unwrap();

        bridge
            .open_resource(
                uri,
                BrowseOptions {
                    before: Some(true),
                    open_in_new_window: Some(false),
                },
            )
            .await
            .unwrap();

        let requests = executor.requests();
        let CommandPayload::BrowseRepoAtRevision(args) = &requests[0].payload else {
            panic!("unexpected payload: {:?}", requests[0].payload);
        };
        assert_eq!(args.before, Some(true));
        assert_eq!(args.open_in_new_window, Some(false));
    }

    #[tokio::test]
    async fn test_open_resource_dispatch_failure() {
        let bridge = CommandBridge::new(MockExecutor::failing(ErrorKind::ExternalError));
        let uri = Url::parse("file:///repo/Cargo.toml").unwrap();

        let error = bridge
            .open_resource(uri, BrowseOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::ExternalError);
    }
}
