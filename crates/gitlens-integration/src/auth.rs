//! Authentication records exchanged with the cloud authentication flow.
//!
//! These are plain data. Field names follow the broker's JSON contract.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::{CloudIntegrationAuthType, CloudIntegrationType};

/// Account a provider session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSessionAccount {
    /// Provider-side account identifier.
    pub id: String,
    /// Human-readable account name.
    pub label: String,
}

impl AuthenticationSessionAccount {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A provider authentication session with an optional expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAuthenticationSession {
    /// Session identifier.
    pub id: String,
    /// Access token used against the provider's API.
    pub access_token: String,
    /// Account the session was created for.
    pub account: AuthenticationSessionAccount,
    /// Scopes granted to the session.
    pub scopes: Vec<String>,
    /// When the session stops being valid, if it expires at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
}

impl fmt::Debug for ProviderAuthenticationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAuthenticationSession")
            .field("id", &self.id)
            .field("access_token", &"<redacted>")
            .field("account", &self.account)
            .field("scopes", &self.scopes)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl ProviderAuthenticationSession {
    /// Returns whether the session has expired at `now`.
    ///
    /// Sessions without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Session issued by the cloud broker for a connected integration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudIntegrationAuthenticationSession {
    #[serde(rename = "type")]
    pub auth_type: CloudIntegrationAuthType,
    pub access_token: String,
    pub domain: String,
    /// Lifetime of the token in seconds.
    pub expires_in: u64,
    /// Granted scopes as a single delimited string.
    pub scopes: String,
}

impl fmt::Debug for CloudIntegrationAuthenticationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudIntegrationAuthenticationSession")
            .field("auth_type", &self.auth_type)
            .field("access_token", &"<redacted>")
            .field("domain", &self.domain)
            .field("expires_in", &self.expires_in)
            .field("scopes", &self.scopes)
            .finish()
    }
}

impl CloudIntegrationAuthenticationSession {
    /// Returns when a session issued at `issued_at` expires.
    ///
    /// A zero lifetime means the token does not expire.
    pub fn expires_at(&self, issued_at: Timestamp) -> Option<Timestamp> {
        if self.expires_in == 0 {
            return None;
        }

        let lifetime = SignedDuration::from_secs(i64::try_from(self.expires_in).ok()?);
        issued_at.checked_add(lifetime).ok()
    }

    /// Splits the scope string on commas and whitespace.
    pub fn scope_list(&self) -> Vec<String> {
        self.scopes
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|scope| !scope.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Converts the broker session into a provider session.
    pub fn into_provider_session(
        self,
        id: impl Into<String>,
        account: AuthenticationSessionAccount,
        issued_at: Timestamp,
    ) -> ProviderAuthenticationSession {
        let scopes = self.scope_list();
        let expires_at = self.expires_at(issued_at);

        ProviderAuthenticationSession {
            id: id.into(),
            access_token: self.access_token,
            account,
            scopes,
            expires_at,
        }
    }
}

/// Where to send the user to authorize a cloud integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudIntegrationAuthorization {
    pub url: String,
}

/// A connected cloud integration as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudIntegrationConnection {
    #[serde(rename = "type")]
    pub auth_type: CloudIntegrationAuthType,
    pub provider: CloudIntegrationType,
    pub domain: String,
}

impl CloudIntegrationConnection {
    pub fn new(
        auth_type: CloudIntegrationAuthType,
        provider: CloudIntegrationType,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            auth_type,
            provider,
            domain: domain.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn broker_session(expires_in: u64) -> CloudIntegrationAuthenticationSession {
        CloudIntegrationAuthenticationSession {
            auth_type: CloudIntegrationAuthType::OAuth,
            access_token: "secret-token".to_owned(),
            domain: "example.atlassian.net".to_owned(),
            expires_in,
            scopes: "read:jira-user, read:jira-work write:jira-work".to_owned(),
        }
    }

    #[test]
    fn test_broker_session_wire_shape() {
        let session: CloudIntegrationAuthenticationSession = serde_json::from_value(json!({
            "type": "pat",
            "accessToken": "abc",
            "domain": "github.com",
            "expiresIn": 3600,
            "scopes": "repo"
        }))
        .unwrap();

        assert_eq!(session.auth_type, CloudIntegrationAuthType::Pat);
        assert_eq!(session.access_token, "abc");
        assert_eq!(session.expires_in, 3600);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["type"], "pat");
        assert_eq!(value["accessToken"], "abc");
        assert_eq!(value["expiresIn"], 3600);
    }

    #[test]
    fn test_connection_wire_shape() {
        let connection = CloudIntegrationConnection::new(
            CloudIntegrationAuthType::OAuth,
            CloudIntegrationType::Jira,
            "example.atlassian.net",
        );

        assert_eq!(
            serde_json::to_value(&connection).unwrap(),
            json!({ "type": "oauth", "provider": "jira", "domain": "example.atlassian.net" })
        );
    }

    #[test]
    fn test_authorization_wire_shape() {
        let authorization: CloudIntegrationAuthorization =
            serde_json::from_value(json!({ "url": "https://app.gitkraken.com/connect" })).unwrap();
        assert_eq!(authorization.url, "https://app.gitkraken.com/connect");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let session = broker_session(60);
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-token"));

        let provider = session.into_provider_session(
            "session-1",
            AuthenticationSessionAccount::new("1", "octocat"),
            Timestamp::UNIX_EPOCH,
        );
        assert!(!format!("{provider:?}").contains("secret-token"));
    }

    #[test]
    fn test_expires_at() {
        let issued_at = Timestamp::from_second(1_700_000_000).unwrap();

        let session = broker_session(3600);
        assert_eq!(
            session.expires_at(issued_at),
            Some(Timestamp::from_second(1_700_003_600).unwrap())
        );

        assert_eq!(broker_session(0).expires_at(issued_at), None);
        assert_eq!(broker_session(u64::MAX).expires_at(issued_at), None);
    }

    #[test]
    fn test_into_provider_session() {
        let issued_at = Timestamp::from_second(1_700_000_000).unwrap();
        let session = broker_session(60).into_provider_session(
            "session-1",
            AuthenticationSessionAccount::new("42", "jdoe"),
            issued_at,
        );

        assert_eq!(session.access_token, "secret-token");
        assert_eq!(
            session.scopes,
            vec!["read:jira-user", "read:jira-work", "write:jira-work"]
        );
        assert!(!session.is_expired_at(issued_at));
        assert!(session.is_expired_at(Timestamp::from_second(1_700_000_060).unwrap()));
    }

    #[test]
    fn test_session_without_expiry() {
        let session: ProviderAuthenticationSession = serde_json::from_value(json!({
            "id": "s",
            "accessToken": "t",
            "account": { "id": "1", "label": "octocat" },
            "scopes": ["repo"]
        }))
        .unwrap();

        assert_eq!(session.expires_at, None);
        assert!(!session.is_expired_at(Timestamp::MAX));
        assert!(
            serde_json::to_value(&session)
                .unwrap()
                .get("expiresAt")
                .is_none()
        );
    }
}
