//! Application service — SSH deploy-key bootstrap use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::address::{parse_address, parse_ssh_proxy};
use crate::domain::credential::{Secret, ssh_remote};
use crate::domain::error::SshError;
use crate::domain::ssh::{
    AGENT_SOCKET, AGENT_SOCKET_ENV, KeyScanTarget, SshPaths, identity_file_content,
    known_hosts_or_default, render_ssh_config, scanned_known_hosts,
};

const WINDOWS_UNSUPPORTED_WARNING: &str = "\
Currently, the deploy_key option is not supported on the windows-latest.
Watch https://github.com/peaceiris/actions-gh-pages/issues/87
";

/// Operating system family the agent is started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    Unix,
}

impl HostPlatform {
    /// Platform of the running binary.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Inputs for [`setup_ssh_key`].
pub struct SshKeyOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub deploy_key: &'a Secret,
    /// Normalized `host/owner/repo`.
    pub publish_repo: &'a str,
    /// Optional `host[:port]`; empty when unset.
    pub ssh_proxy: &'a str,
    /// Home directory whose `.ssh` is populated.
    pub home: &'a Path,
    pub platform: HostPlatform,
}

/// Result of a completed bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshSession {
    /// `git@<host>:<path>.git`
    pub remote_url: String,
    /// Socket of the agent holding the deploy key. Children that push must
    /// see it as `SSH_AUTH_SOCK`.
    pub agent_socket: PathBuf,
}

/// Prepares `~/.ssh` and an SSH agent so `git push` can use the deploy key.
///
/// Steps run in order and any failure aborts the bootstrap, except the host
/// key scan: when `ssh-keyscan` fails the bundled known hosts are written.
///
/// # Errors
///
/// Returns an error if a file cannot be written, permissions cannot be set,
/// or the agent cannot be started or loaded with the key.
pub async fn setup_ssh_key(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    opts: SshKeyOptions<'_, impl ProgressReporter>,
) -> Result<SshSession> {
    let SshKeyOptions {
        reporter,
        deploy_key,
        publish_repo,
        ssh_proxy,
        home,
        platform,
    } = opts;
    reporter.step("setup SSH deploy key");

    let address = parse_address(publish_repo);
    let proxy = parse_ssh_proxy(ssh_proxy);
    let paths = SshPaths::under_home(home);

    fs.create_dir_all(&paths.dir)?;
    fs.set_permissions(&paths.dir, 0o700)?;

    let target = KeyScanTarget::new(&address.host, proxy.as_ref());
    reporter.step(&format!("scanning SSH keys to {target}"));
    let scan = scan_host_keys(runner, &target).await;
    if let Err(e) = &scan {
        reporter.debug(&e.to_string());
        reporter.step("ssh-scan failed. Returning default keys");
    }
    write_private(
        fs,
        reporter,
        &paths.known_hosts,
        &known_hosts_or_default(scan),
    )?;

    write_private(
        fs,
        reporter,
        &paths.identity,
        &identity_file_content(deploy_key.expose()),
    )?;

    let config = render_ssh_config(&address.host, proxy.as_ref(), &paths.identity);
    write_private(fs, reporter, &paths.config, &config)?;

    let agent_socket = start_agent(runner, reporter, platform).await?;
    add_identity(runner, &agent_socket, &paths.identity).await?;
    reporter.success("SSH deploy key loaded into agent");

    Ok(SshSession {
        remote_url: ssh_remote(&address),
        agent_socket,
    })
}

/// Runs `ssh-keyscan` against `target`.
///
/// # Errors
///
/// Returns [`SshError::KeyScanFailed`] if the tool cannot be spawned or
/// exits non-zero.
pub async fn scan_host_keys(
    runner: &impl CommandRunner,
    target: &KeyScanTarget<'_>,
) -> Result<String, SshError> {
    let output = runner
        .run("ssh-keyscan", &target.args())
        .await
        .map_err(|e| SshError::KeyScanFailed(format!("{e:#}")))?;
    if !output.status.success() {
        return Err(SshError::KeyScanFailed(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(scanned_known_hosts(&output.stdout, &output.stderr))
}

fn write_private(
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    path: &Path,
    content: &str,
) -> Result<()> {
    fs.write(path, content)?;
    reporter.step(&format!("wrote {}", path.display()));
    fs.set_permissions(path, 0o600)
}

async fn start_agent(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    platform: HostPlatform,
) -> Result<PathBuf> {
    if platform == HostPlatform::Windows {
        reporter.warn(WINDOWS_UNSUPPORTED_WARNING);
        // Elevation and the throwaway agent are best effort.
        let _ = runner
            .run(
                "powershell.exe",
                &["Start-Process", "powershell.exe", "-Verb", "runas"],
            )
            .await;
        let _ = runner.run("sh", &["-c", "eval \"$(ssh-agent)\""]).await;
        run_checked(runner, "sc", &["config", "ssh-agent", "start=auto"]).await?;
        run_checked(runner, "sc", &["start", "ssh-agent"]).await?;
    }

    run_checked(runner, "ssh-agent", &["-a", AGENT_SOCKET]).await?;
    reporter.debug(&format!("{AGENT_SOCKET_ENV}={AGENT_SOCKET}"));
    Ok(PathBuf::from(AGENT_SOCKET))
}

async fn add_identity(runner: &impl CommandRunner, socket: &Path, identity: &Path) -> Result<()> {
    let socket = socket.to_string_lossy();
    let identity = identity.to_string_lossy();
    let output = runner
        .run_with_env(
            "ssh-add",
            &[identity.as_ref()],
            &[(AGENT_SOCKET_ENV, socket.as_ref())],
        )
        .await
        .context("running ssh-add")?;
    ensure_success("ssh-add", &output)
}

async fn run_checked(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Result<()> {
    let output = runner
        .run(program, args)
        .await
        .with_context(|| format!("running {program}"))?;
    ensure_success(program, &output)
}

fn ensure_success(program: &str, output: &Output) -> Result<()> {
    anyhow::ensure!(
        output.status.success(),
        "{program} failed ({}): {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    );
    Ok(())
}
