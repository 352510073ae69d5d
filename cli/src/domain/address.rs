//! Repository address normalization.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt;

/// A repository location split into its host and the path below it.
///
/// `host` never contains a slash. `path` carries no leading or trailing
/// slash and no scheme; it is usually `owner/repo` but may be deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoAddress {
    pub host: String,
    pub path: String,
}

impl fmt::Display for RepoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.host)
        } else {
            write!(f, "{}/{}", self.host, self.path)
        }
    }
}

/// Normalizes a free-form repository reference into a [`RepoAddress`].
///
/// Accepts full URLs (`https://github.com/owner/repo/`), canonical
/// `host/owner/repo` strings and bare `owner/repo`. A leading `scheme://`
/// and trailing slashes are stripped, then the remainder is split on the
/// first slash. Without a slash the whole string becomes the host.
///
/// Any string is accepted; callers enforce the shape they expect.
#[must_use]
pub fn parse_address(input: &str) -> RepoAddress {
    let without_scheme = strip_scheme(input.trim());
    let trimmed = without_scheme.trim_end_matches('/');
    match trimmed.split_once('/') {
        Some((host, path)) => RepoAddress {
            host: host.to_string(),
            path: path.trim_matches('/').to_string(),
        },
        None => RepoAddress {
            host: trimmed.to_string(),
            path: String::new(),
        },
    }
}

fn strip_scheme(input: &str) -> &str {
    match input.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) =>
        {
            rest
        }
        _ => input,
    }
}

/// Override target for the SSH host-key scan and `HostName` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshProxy {
    pub host: String,
    /// Kept as text; it is only ever passed through to `ssh-keyscan -p` and
    /// the `Port` line of the ssh config.
    pub port: Option<String>,
}

/// Parses an optional `host[:port]` proxy string.
///
/// Returns `None` when the input is empty. The port is present only when
/// the host part contains a `:`.
#[must_use]
pub fn parse_ssh_proxy(input: &str) -> Option<SshProxy> {
    let RepoAddress { host, .. } = parse_address(input);
    let mut parts = host.split(':');
    let proxy_host = parts.next().unwrap_or_default();
    if proxy_host.is_empty() {
        return None;
    }
    let port = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
    Some(SshProxy {
        host: proxy_host.to_string(),
        port,
    })
}
