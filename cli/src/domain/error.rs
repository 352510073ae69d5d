//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Message text is matched verbatim by operators
//! reading job logs, so keep it stable.

use thiserror::Error;

// ── Credential errors ─────────────────────────────────────────────────────────

/// Errors raised while choosing or formatting a push credential.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "The generated GITHUB_TOKEN (github_token) does not support to push to an external repository.\nUse deploy_key or personal_token.\n"
    )]
    ExternalRepositoryNotSupported,

    #[error(
        "You deploy from {branch} to {branch}\nThis operation is prohibited to protect your contents\n"
    )]
    SelfPushProhibited { branch: String },

    #[error("not found deploy key or tokens")]
    NoCredentialProvided,

    #[error("Invalid repository '{0}': expected 'owner/repo'")]
    InvalidRepository(String),
}

impl CredentialError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExternalRepositoryNotSupported => "external_repository_not_supported",
            Self::SelfPushProhibited { .. } => "self_push_prohibited",
            Self::NoCredentialProvided => "no_credential_provided",
            Self::InvalidRepository(_) => "invalid_repository",
        }
    }
}

// ── SSH errors ────────────────────────────────────────────────────────────────

/// Errors from the SSH bootstrap that are handled inside it.
#[derive(Debug, Error)]
pub enum SshError {
    /// `ssh-keyscan` could not be run or exited non-zero. Never surfaced;
    /// the bootstrap substitutes the bundled known hosts.
    #[error("ssh-keyscan failed: {0}")]
    KeyScanFailed(String),
}
