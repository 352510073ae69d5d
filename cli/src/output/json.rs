//! JSON output helpers.
//!
//! Provides the result document for `setup --json` and the error-object
//! formatter used by all `--json` code paths when a command fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::dispatch::PushRemote;
use crate::domain::error::CredentialError;

/// Result document for `setup --json`.
#[derive(Debug, Serialize)]
pub struct RemoteDocument<'a> {
    pub remote_url: &'a str,
    pub ssh_auth_sock: Option<&'a PathBuf>,
}

impl<'a> From<&'a PushRemote> for RemoteDocument<'a> {
    fn from(remote: &'a PushRemote) -> Self {
        Self {
            remote_url: &remote.url,
            ssh_auth_sock: remote.agent_socket.as_ref(),
        }
    }
}

/// Serialize a push remote as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_remote(remote: &PushRemote) -> Result<String> {
    serde_json::to_string_pretty(&RemoteDocument::from(remote)).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for an error chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<CredentialError>()
        .map_or("error", CredentialError::code)
}
