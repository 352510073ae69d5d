//! Resolution of the repository a publish run pushes to.

use anyhow::Result;

use crate::domain::address::{RepoAddress, parse_address};
use crate::domain::error::CredentialError;

/// The repository that triggered the run, as `owner` and `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// Parses a plain `owner/repo` reference.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidRepository`] unless the input has
    /// exactly one slash with a non-empty owner and name.
    pub fn parse(input: &str) -> Result<Self> {
        let RepoAddress { host, path } = parse_address(input);
        if host.is_empty() || path.is_empty() || path.contains('/') {
            return Err(CredentialError::InvalidRepository(input.to_string()).into());
        }
        Ok(Self {
            owner: host,
            name: path,
        })
    }
}

/// Decides the `host/owner/repo` string a push should target.
///
/// With no external repository the default server host is combined with
/// `owner/repo`. A bare external `owner/repo` is placed on the default
/// server; an external reference that already names its own host (for
/// example an enterprise server) is kept as is.
#[must_use]
pub fn resolve_publish_repo(
    external_repository: &str,
    default_server: &str,
    owner: &str,
    repo: &str,
) -> String {
    let default_host = parse_address(default_server).host;
    if external_repository.is_empty() {
        return format!("{default_host}/{owner}/{repo}");
    }
    let external = parse_address(external_repository).to_string();
    if external.matches('/').count() <= 1 {
        format!("{default_host}/{external}")
    } else {
        external
    }
}
