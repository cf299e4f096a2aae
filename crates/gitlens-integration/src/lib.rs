#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod models;
mod registry;

pub mod auth;

pub use gitlens_core::{Error, ErrorKind, Result};
pub use models::{
    CloudIntegrationAuthType, CloudIntegrationType, HostingIntegrationId, IntegrationId,
    IssueIntegrationId, SelfHostedIntegrationId,
};
pub use registry::{
    CloudIntegrations, SupportedCloudIntegrationId, SupportedIds, to_cloud_integration_type,
    to_integration_id,
};

/// Tracing target for integration registry operations.
pub const TRACING_TARGET: &str = "gitlens_integration::registry";

/// URI path the host routes to once the cloud broker finishes authenticating.
pub const CLOUD_INTEGRATION_AUTHENTICATION_URI_PATH_PREFIX: &str =
    "did-authenticate-cloud-integration";
