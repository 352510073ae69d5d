//! Credential selection and push-URL formatting.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;

use anyhow::Result;
use regex::Regex;

use crate::domain::address::{RepoAddress, parse_address};
use crate::domain::error::CredentialError;

/// A secret string that never prints itself through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// The one credential a run authenticates with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// SSH private key with push access to the publish repository.
    DeployKey(Secret),
    /// Short-lived token issued by the platform for the triggering repository.
    PlatformToken(Secret),
    /// Personal access token.
    PersonalToken(Secret),
}

impl Credential {
    /// Picks the credential to use from the raw inputs.
    ///
    /// Precedence is deploy key, then platform token, then personal token.
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NoCredentialProvided`] if all three are empty.
    pub fn select(deploy_key: &str, platform_token: &str, personal_token: &str) -> Result<Self> {
        if !deploy_key.is_empty() {
            Ok(Self::DeployKey(Secret::new(deploy_key)))
        } else if !platform_token.is_empty() {
            Ok(Self::PlatformToken(Secret::new(platform_token)))
        } else if !personal_token.is_empty() {
            Ok(Self::PersonalToken(Secret::new(personal_token)))
        } else {
            Err(CredentialError::NoCredentialProvided.into())
        }
    }

    /// Short label used in progress output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeployKey(_) => "SSH deploy key",
            Self::PlatformToken(_) => "GITHUB_TOKEN",
            Self::PersonalToken(_) => "personal access token",
        }
    }
}

/// Triggering event details needed by the platform-token safety checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    /// Event name, e.g. `push` or `pull_request`.
    pub event_name: String,
    /// Full ref, e.g. `refs/heads/main`.
    pub git_ref: String,
}

fn token_url(token: &str, publish_repo: &str) -> String {
    let RepoAddress { host, path } = parse_address(publish_repo);
    format!("https://x-access-token:{token}@{host}/{path}.git")
}

/// Formats the HTTPS remote for a personal access token.
#[must_use]
pub fn personal_token_remote(token: &Secret, publish_repo: &str) -> String {
    token_url(token.expose(), publish_repo)
}

/// Formats the HTTPS remote for a platform-issued token.
///
/// # Errors
///
/// - [`CredentialError::ExternalRepositoryNotSupported`] if an external
///   repository is configured; the token only grants access to the
///   triggering repository.
/// - [`CredentialError::SelfPushProhibited`] on a `push` event whose ref is
///   exactly `refs/heads/<publish_branch>`.
pub fn platform_token_remote(
    token: &Secret,
    publish_repo: &str,
    publish_branch: &str,
    external_repository: &str,
    event: &EventContext,
) -> Result<String> {
    if !external_repository.is_empty() {
        return Err(CredentialError::ExternalRepositoryNotSupported.into());
    }
    if event.event_name == "push" && is_publish_branch_ref(&event.git_ref, publish_branch)? {
        return Err(CredentialError::SelfPushProhibited {
            branch: publish_branch.to_string(),
        }
        .into());
    }
    Ok(token_url(token.expose(), publish_repo))
}

fn is_publish_branch_ref(git_ref: &str, publish_branch: &str) -> Result<bool> {
    let pattern = Regex::new(&format!("^refs/heads/{}$", regex::escape(publish_branch)))?;
    Ok(pattern.is_match(git_ref))
}

/// Formats the SSH remote for a deploy key.
#[must_use]
pub fn ssh_remote(address: &RepoAddress) -> String {
    format!("git@{}:{}.git", address.host, address.path)
}
