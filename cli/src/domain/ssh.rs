//! SSH text generation for the deploy-key bootstrap.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::domain::address::SshProxy;
use crate::domain::error::SshError;

/// Fixed socket the SSH agent is bound to.
pub const AGENT_SOCKET: &str = "/tmp/ssh-auth.sock";

/// Environment variable through which `ssh` and `ssh-add` find the agent.
pub const AGENT_SOCKET_ENV: &str = "SSH_AUTH_SOCK";

/// Known hosts written when `ssh-keyscan` cannot be used.
pub const DEFAULT_KNOWN_HOSTS: &str = "\
# github.com:22 SSH-2.0-babeld-1f0633a6
github.com ssh-rsa AAAAB3NzaC1yc2EAAAABIwAAAQEAq2A7hRGmdnm9tUDbO9IDSwBK6TbQa+PXYPCPy6rbTrTtw7PHkccKrpp0yVhp5HdEIcKr6pLlVDBfOLX9QUsyCOV0wzfjIJNlGEYsdlLJizHhbn2mUjvSAHQqZETYP81eFzLQNnPHt4EVVUh7VfDESU84KezmD5QlWpXLmvU31/yMf+Se8xhHTvKSCZIFImWwoG6mbUoWf9nzpIoaSjB+weqqUUmpaaasXVal72J+UX2B+2RPW3RcT0eOzQgqlJL3RKrTJvdsjE3JEAvGq3lGHSZXy28G3skua2SmVi/w4yCE6gbODqnTWlg7+wC604ydGXA8VJiS5ap43JXiUFFAaQ==
# ssh.github.com:443 SSH-2.0-babeld-17a926d7
[ssh.github.com]:443 ssh-rsa AAAAB3NzaC1yc2EAAAABIwAAAQEAq2A7hRGmdnm9tUDbO9IDSwBK6TbQa+PXYPCPy6rbTrTtw7PHkccKrpp0yVhp5HdEIcKr6pLlVDBfOLX9QUsyCOV0wzfjIJNlGEYsdlLJizHhbn2mUjvSAHQqZETYP81eFzLQNnPHt4EVVUh7VfDESU84KezmD5QlWpXLmvU31/yMf+Se8xhHTvKSCZIFImWwoG6mbUoWf9nzpIoaSjB+weqqUUmpaaasXVal72J+UX2B+2RPW3RcT0eOzQgqlJL3RKrTJvdsjE3JEAvGq3lGHSZXy28G3skua2SmVi/w4yCE6gbODqnTWlg7+wC604ydGXA8VJiS5ap43JXiUFFAaQ==
";

/// Locations of the files the bootstrap writes under `~/.ssh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPaths {
    pub dir: PathBuf,
    pub known_hosts: PathBuf,
    pub identity: PathBuf,
    pub config: PathBuf,
}

impl SshPaths {
    /// Lays out `<home>/.ssh/{known_hosts, github, config}`.
    #[must_use]
    pub fn under_home(home: &Path) -> Self {
        let dir = home.join(".ssh");
        Self {
            known_hosts: dir.join("known_hosts"),
            identity: dir.join("github"),
            config: dir.join("config"),
            dir,
        }
    }
}

/// Host (and optional port) whose keys get scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScanTarget<'a> {
    pub host: &'a str,
    pub port: Option<&'a str>,
}

impl<'a> KeyScanTarget<'a> {
    /// The proxy when one is configured, otherwise the push host.
    #[must_use]
    pub fn new(host: &'a str, proxy: Option<&'a SshProxy>) -> Self {
        match proxy {
            Some(p) => Self {
                host: &p.host,
                port: p.port.as_deref(),
            },
            None => Self { host, port: None },
        }
    }

    /// Arguments for `ssh-keyscan`: `-t rsa [-p <port>] <host>`.
    #[must_use]
    pub fn args(&self) -> Vec<&'a str> {
        let mut args = vec!["-t", "rsa"];
        if let Some(port) = self.port {
            args.extend(["-p", port]);
        }
        args.push(self.host);
        args
    }
}

impl std::fmt::Display for KeyScanTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => f.write_str(self.host),
        }
    }
}

/// Known-hosts content from a successful scan: stderr then stdout, verbatim.
#[must_use]
pub fn scanned_known_hosts(stdout: &[u8], stderr: &[u8]) -> String {
    let mut content = String::from_utf8_lossy(stderr).into_owned();
    content.push_str(&String::from_utf8_lossy(stdout));
    content
}

/// Fallback policy for the key scan: a failed scan yields [`DEFAULT_KNOWN_HOSTS`].
#[must_use]
pub fn known_hosts_or_default(scan: Result<String, SshError>) -> String {
    scan.unwrap_or_else(|_| DEFAULT_KNOWN_HOSTS.to_string())
}

/// Renders the `~/.ssh/config` block for the push host.
///
/// The returned text ends with a blank line.
#[must_use]
pub fn render_ssh_config(host: &str, proxy: Option<&SshProxy>, identity: &Path) -> String {
    let hostname = proxy.map_or(host, |p| p.host.as_str());
    let mut config = format!(
        "Host {host}\n    HostName {hostname}\n    IdentityFile {}\n    User git\n",
        identity.display()
    );
    if let Some(port) = proxy.and_then(|p| p.port.as_deref()) {
        let _ = writeln!(config, "    Port {port}");
    }
    config.push('\n');
    config
}

/// Private key file content: the deploy key followed by a newline.
#[must_use]
pub fn identity_file_content(deploy_key: &str) -> String {
    format!("{deploy_key}\n")
}
