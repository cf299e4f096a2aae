//! Cloud integration eligibility and provider tag mappings.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use derive_more::{Deref, Into};
use gitlens_core::{CLOUD_INTEGRATIONS_GITHUB_ENABLED, FlagSource};

use crate::auth::CloudIntegrationConnection;
use crate::models::{
    CloudIntegrationAuthType, CloudIntegrationType, HostingIntegrationId, IntegrationId,
    IssueIntegrationId, SelfHostedIntegrationId,
};
use crate::{Error, Result, TRACING_TARGET};

const SUPPORTED_CLOUD_INTEGRATION_IDS: &[IntegrationId] =
    &[IntegrationId::Issue(IssueIntegrationId::Jira)];

const SUPPORTED_CLOUD_INTEGRATION_IDS_EXPERIMENTAL: &[IntegrationId] = &[
    IntegrationId::Issue(IssueIntegrationId::Jira),
    IntegrationId::Hosting(HostingIntegrationId::GitHub),
];

/// Returns the integration id a cloud provider tag refers to.
pub const fn to_integration_id(tag: CloudIntegrationType) -> IntegrationId {
    match tag {
        CloudIntegrationType::Jira => IntegrationId::Issue(IssueIntegrationId::Jira),
        CloudIntegrationType::Trello => IntegrationId::Issue(IssueIntegrationId::Trello),
        CloudIntegrationType::Gitlab => IntegrationId::Hosting(HostingIntegrationId::GitLab),
        CloudIntegrationType::Github => IntegrationId::Hosting(HostingIntegrationId::GitHub),
        CloudIntegrationType::Bitbucket => IntegrationId::Hosting(HostingIntegrationId::Bitbucket),
        CloudIntegrationType::Azure => IntegrationId::Hosting(HostingIntegrationId::AzureDevOps),
    }
}

/// Returns the cloud provider tag of an integration id.
///
/// `None` means the integration cannot authenticate through the cloud broker.
pub const fn to_cloud_integration_type(id: IntegrationId) -> Option<CloudIntegrationType> {
    match id {
        IntegrationId::Issue(IssueIntegrationId::Jira) => Some(CloudIntegrationType::Jira),
        IntegrationId::Issue(IssueIntegrationId::Trello) => Some(CloudIntegrationType::Trello),
        IntegrationId::Hosting(HostingIntegrationId::GitLab) => Some(CloudIntegrationType::Gitlab),
        IntegrationId::Hosting(HostingIntegrationId::GitHub) => Some(CloudIntegrationType::Github),
        IntegrationId::Hosting(HostingIntegrationId::Bitbucket) => {
            Some(CloudIntegrationType::Bitbucket)
        }
        IntegrationId::Hosting(HostingIntegrationId::AzureDevOps) => {
            Some(CloudIntegrationType::Azure)
        }
        IntegrationId::SelfHosted(SelfHostedIntegrationId::GitHubEnterprise) => None,
        IntegrationId::SelfHosted(SelfHostedIntegrationId::GitLabSelfHosted) => None,
    }
}

impl From<CloudIntegrationType> for IntegrationId {
    fn from(tag: CloudIntegrationType) -> Self {
        to_integration_id(tag)
    }
}

impl IntegrationId {
    /// Returns the cloud provider tag of this integration, if it has one.
    pub const fn cloud_integration_type(self) -> Option<CloudIntegrationType> {
        to_cloud_integration_type(self)
    }
}

/// An integration id that was eligible for cloud authentication when checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deref, Into)]
pub struct SupportedCloudIntegrationId(IntegrationId);

impl SupportedCloudIntegrationId {
    /// Returns the wrapped integration id.
    pub const fn id(&self) -> IntegrationId {
        self.0
    }

    /// Returns the cloud provider tag of the wrapped id.
    pub fn cloud_integration_type(&self) -> Option<CloudIntegrationType> {
        to_cloud_integration_type(self.0)
    }
}

impl fmt::Display for SupportedCloudIntegrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Answers which integrations can currently authenticate through the cloud broker.
///
/// Eligibility depends on the `experimental.cloudIntegrations.github.enabled`
/// flag. The flag is read from the [`FlagSource`] on every call, so a reload
/// is visible to the next call without rebuilding the registry.
#[derive(Clone)]
pub struct CloudIntegrations {
    flags: Arc<dyn FlagSource>,
}

impl fmt::Debug for CloudIntegrations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudIntegrations").finish_non_exhaustive()
    }
}

impl CloudIntegrations {
    /// Creates a registry reading flags from `flags`.
    pub fn new<F>(flags: F) -> Self
    where
        F: FlagSource + 'static,
    {
        Self {
            flags: Arc::new(flags),
        }
    }

    /// Creates a registry from an already shared flag source.
    pub fn from_shared(flags: Arc<dyn FlagSource>) -> Self {
        Self { flags }
    }

    fn candidates(&self) -> &'static [IntegrationId] {
        let experimental = self.flags.get(CLOUD_INTEGRATIONS_GITHUB_ENABLED, false);
        let ids = if experimental {
            SUPPORTED_CLOUD_INTEGRATION_IDS_EXPERIMENTAL
        } else {
            SUPPORTED_CLOUD_INTEGRATION_IDS
        };

        tracing::trace!(
            target: TRACING_TARGET,
            experimental,
            candidates = ids.len(),
            "Sampled cloud integrations flag"
        );

        ids
    }

    /// Returns whether `id` can currently authenticate through the cloud broker.
    pub fn is_supported(&self, id: impl Into<IntegrationId>) -> bool {
        let id = id.into();
        self.candidates().contains(&id)
    }

    /// Returns the currently supported ids in declaration order.
    ///
    /// The flag is sampled once, when this is called. Later flag changes do
    /// not affect the returned iterator; call again for a fresh view.
    pub fn supported_ids(&self) -> SupportedIds {
        SupportedIds {
            inner: self.candidates().iter(),
        }
    }

    /// Checks that `id` is currently supported.
    pub fn check(&self, id: impl Into<IntegrationId>) -> Result<SupportedCloudIntegrationId> {
        let id = id.into();
        if self.is_supported(id) {
            Ok(SupportedCloudIntegrationId(id))
        } else {
            Err(Error::unsupported()
                .with_message(format!("integration '{id}' does not support cloud authentication")))
        }
    }

    /// Builds the connection record for `id`, if it has a cloud provider tag.
    pub fn connection_for(
        &self,
        id: impl Into<IntegrationId>,
        auth_type: CloudIntegrationAuthType,
        domain: impl Into<String>,
    ) -> Option<CloudIntegrationConnection> {
        let provider = to_cloud_integration_type(id.into())?;
        Some(CloudIntegrationConnection::new(auth_type, provider, domain))
    }
}

/// Iterator over the integration ids supported when it was created.
#[derive(Debug, Clone)]
pub struct SupportedIds {
    inner: slice::Iter<'static, IntegrationId>,
}

impl Iterator for SupportedIds {
    type Item = SupportedCloudIntegrationId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied().map(SupportedCloudIntegrationId)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SupportedIds {}

impl FusedIterator for SupportedIds {}
