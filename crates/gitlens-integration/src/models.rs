//! Integration ids and cloud provider tags.

use std::fmt;
use std::str::FromStr;

use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, ErrorKind, Result};

/// Code hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
pub enum HostingIntegrationId {
    #[strum(serialize = "github")]
    #[serde(rename = "github")]
    GitHub,
    #[strum(serialize = "gitlab")]
    #[serde(rename = "gitlab")]
    GitLab,
    #[strum(serialize = "bitbucket")]
    #[serde(rename = "bitbucket")]
    Bitbucket,
    #[strum(serialize = "azureDevOps")]
    #[serde(rename = "azureDevOps")]
    AzureDevOps,
}

/// Issue tracking providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IssueIntegrationId {
    Jira,
    Trello,
}

/// On-premises deployments of a provider.
///
/// These are never eligible for cloud authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
pub enum SelfHostedIntegrationId {
    #[strum(serialize = "github-enterprise")]
    #[serde(rename = "github-enterprise")]
    GitHubEnterprise,
    #[strum(serialize = "gitlab-self-hosted")]
    #[serde(rename = "gitlab-self-hosted")]
    GitLabSelfHosted,
}

/// Internal identifier of a third-party integration.
///
/// Serialized as the bare string id of the wrapped provider, e.g. `"jira"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntegrationId {
    Hosting(HostingIntegrationId),
    Issue(IssueIntegrationId),
    SelfHosted(SelfHostedIntegrationId),
}

impl IntegrationId {
    /// Every integration id, in declaration order.
    pub const ALL: [IntegrationId; 8] = [
        Self::Hosting(HostingIntegrationId::GitHub),
        Self::Hosting(HostingIntegrationId::GitLab),
        Self::Hosting(HostingIntegrationId::Bitbucket),
        Self::Hosting(HostingIntegrationId::AzureDevOps),
        Self::Issue(IssueIntegrationId::Jira),
        Self::Issue(IssueIntegrationId::Trello),
        Self::SelfHosted(SelfHostedIntegrationId::GitHubEnterprise),
        Self::SelfHosted(SelfHostedIntegrationId::GitLabSelfHosted),
    ];

    /// Returns the string id of this integration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosting(id) => id.into(),
            Self::Issue(id) => id.into(),
            Self::SelfHosted(id) => id.into(),
        }
    }

    #[must_use]
    pub const fn is_hosting(&self) -> bool {
        matches!(self, Self::Hosting(_))
    }

    #[must_use]
    pub const fn is_issue(&self) -> bool {
        matches!(self, Self::Issue(_))
    }

    #[must_use]
    pub const fn is_self_hosted(&self) -> bool {
        matches!(self, Self::SelfHosted(_))
    }
}

impl fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<HostingIntegrationId>()
            .map(Self::Hosting)
            .or_else(|_| s.parse::<IssueIntegrationId>().map(Self::Issue))
            .or_else(|_| s.parse::<SelfHostedIntegrationId>().map(Self::SelfHosted))
            .map_err(|_| {
                Error::new(ErrorKind::InvalidInput)
                    .with_message(format!("unknown integration id '{s}'"))
            })
    }
}

/// Provider tag used by the cloud authentication broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CloudIntegrationType {
    Jira,
    Trello,
    Gitlab,
    Github,
    Bitbucket,
    Azure,
}

/// How a cloud integration session was authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CloudIntegrationAuthType {
    /// OAuth authorization through the broker.
    OAuth,
    /// Personal access token.
    Pat,
}
