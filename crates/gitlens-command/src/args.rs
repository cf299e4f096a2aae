//! Argument payloads of the commands the bridge dispatches.

use serde::{Deserialize, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use url::Url;

use crate::Deferred;

/// Sub-commands of the interactive git command wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum GitCommand {
    Branch,
    CherryPick,
    #[strum(serialize = "coauthors")]
    #[serde(rename = "coauthors")]
    CoAuthors,
    Fetch,
    Log,
    Merge,
    Pull,
    Push,
    Rebase,
    Remote,
    Reset,
    Revert,
    Search,
    Show,
    Stash,
    Status,
    Switch,
    Tag,
    Worktree,
}

/// Arguments of the interactive git command wizard.
///
/// Without a [`GitCommand`] the wizard starts at its command picker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommandArgs {
    /// Sub-command to start at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<GitCommand>,
    /// Pre-filled wizard state, specific to the sub-command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    /// Whether the wizard asks for confirmation before running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
}

impl GitCommandArgs {
    /// Creates arguments starting the wizard at `command`.
    pub fn new(command: GitCommand) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }

    /// Sets the pre-filled wizard state.
    pub fn with_state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets whether the wizard confirms before running.
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = Some(confirm);
        self
    }

    /// Attaches a completion token.
    pub fn with_completion(self, completion: Deferred) -> GitCommandArgsWithCompletion {
        GitCommandArgsWithCompletion {
            args: self,
            completion,
        }
    }
}

/// Wizard arguments with the token the wizard settles once it finishes.
#[derive(Debug, Clone, Serialize)]
pub struct GitCommandArgsWithCompletion {
    #[serde(flatten)]
    pub args: GitCommandArgs,
    /// Serialized as `true`; the token itself only exists in process.
    #[serde(serialize_with = "serialize_attached")]
    pub completion: Deferred,
}

fn serialize_attached<S>(_: &Deferred, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(true)
}

/// Options for opening a repository at a revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseOptions {
    /// Open the revision before the one the uri points at.
    pub before: Option<bool>,
    /// Open in a new window instead of the current one.
    pub open_in_new_window: Option<bool>,
}

/// Arguments of the browse-repository-at-revision command.
///
/// Unset options are omitted from the payload rather than sent as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRepoAtRevisionArgs {
    pub uri: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_in_new_window: Option<bool>,
}

impl BrowseRepoAtRevisionArgs {
    pub fn new(uri: Url, options: BrowseOptions) -> Self {
        Self {
            uri,
            before: options.before,
            open_in_new_window: options.open_in_new_window,
        }
    }
}
