//! Command identifiers and dispatch requests.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use url::Url;
use uuid::Uuid;

use crate::args::{BrowseRepoAtRevisionArgs, GitCommandArgsWithCompletion};

/// Identifiers of the host commands the bridge dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize)]
pub enum Commands {
    #[strum(serialize = "gitlens.gitCommands")]
    #[serde(rename = "gitlens.gitCommands")]
    GitCommands,
    #[strum(serialize = "gitlens.browseRepoAtRevision")]
    #[serde(rename = "gitlens.browseRepoAtRevision")]
    BrowseRepoAtRevision,
}

/// Where a command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CommandTarget {
    /// A workbench-level command.
    #[default]
    Workbench,
    /// An editor command, optionally bound to a document.
    Editor {
        #[serde(skip_serializing_if = "Option::is_none")]
        uri: Option<Url>,
    },
}

/// Arguments of a dispatched command.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CommandPayload {
    GitCommands(GitCommandArgsWithCompletion),
    BrowseRepoAtRevision(BrowseRepoAtRevisionArgs),
}

impl CommandPayload {
    /// Returns the command these arguments belong to.
    pub fn command(&self) -> Commands {
        match self {
            Self::GitCommands(_) => Commands::GitCommands,
            Self::BrowseRepoAtRevision(_) => Commands::BrowseRepoAtRevision,
        }
    }
}

impl From<GitCommandArgsWithCompletion> for CommandPayload {
    fn from(args: GitCommandArgsWithCompletion) -> Self {
        Self::GitCommands(args)
    }
}

impl From<BrowseRepoAtRevisionArgs> for CommandPayload {
    fn from(args: BrowseRepoAtRevisionArgs) -> Self {
        Self::BrowseRepoAtRevision(args)
    }
}

/// A command dispatch request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,
    /// Command to run.
    pub command: Commands,
    /// Where the command runs.
    pub target: CommandTarget,
    /// Arguments passed to the command handler.
    pub payload: CommandPayload,
}

impl CommandRequest {
    /// Creates a workbench command request.
    pub fn new(payload: impl Into<CommandPayload>) -> Self {
        let payload = payload.into();
        Self {
            request_id: Uuid::now_v7(),
            command: payload.command(),
            target: CommandTarget::Workbench,
            payload,
        }
    }

    /// Creates an editor command request, optionally bound to `uri`.
    pub fn editor(uri: Option<Url>, payload: impl Into<CommandPayload>) -> Self {
        Self {
            target: CommandTarget::Editor { uri },
            ..Self::new(payload)
        }
    }

    /// Returns the completion token attached to the payload, if any.
    pub fn completion(&self) -> Option<&crate::Deferred> {
        match &self.payload {
            CommandPayload::GitCommands(args) => Some(&args.completion),
            CommandPayload::BrowseRepoAtRevision(_) => None,
        }
    }
}
