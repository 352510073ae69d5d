//! Application service — credential dispatch use-case.
//!
//! Resolves the publish repository once, then runs exactly one credential
//! path and returns the remote to push to.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::ssh_bootstrap::{HostPlatform, SshKeyOptions, setup_ssh_key};
use crate::domain::credential::{
    Credential, EventContext, personal_token_remote, platform_token_remote,
};
use crate::domain::publish_repo::{RepoSlug, resolve_publish_repo};

/// User-supplied inputs for one run. Empty strings mean "not set".
///
/// No `Debug`: three fields hold secrets.
#[derive(Clone, Default)]
pub struct Inputs {
    pub deploy_key: String,
    pub github_token: String,
    pub personal_token: String,
    pub publish_branch: String,
    pub external_repository: String,
    pub ssh_proxy: String,
}

/// Read-only facts about the triggering run, supplied by the CI runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    /// e.g. `https://github.com`
    pub server_url: String,
    pub repository: RepoSlug,
    pub event: EventContext,
}

/// Options for [`set_tokens`] that are not run inputs.
pub struct DispatchOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    /// Home directory used by the SSH path; only required for a deploy key.
    pub home: Option<&'a Path>,
    pub platform: HostPlatform,
}

/// A push-ready remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRemote {
    /// `https://x-access-token:<token>@host/path.git` or `git@host:path.git`.
    pub url: String,
    /// Set when an SSH agent was started; later `git push` calls need it
    /// exported as `SSH_AUTH_SOCK`.
    pub agent_socket: Option<PathBuf>,
}

/// Returns the publish repository (`host/owner/repo`) for this run.
#[must_use]
pub fn publish_repo(inputs: &Inputs, ctx: &ActionContext) -> String {
    resolve_publish_repo(
        &inputs.external_repository,
        &ctx.server_url,
        &ctx.repository.owner,
        &ctx.repository.name,
    )
}

/// Picks the credential from `inputs` and produces the remote to push to.
///
/// Precedence is deploy key, then `GITHUB_TOKEN`, then personal token.
///
/// # Errors
///
/// Returns an error if no credential is set, if the `GITHUB_TOKEN` safety
/// checks reject the push, or if the SSH bootstrap fails.
pub async fn set_tokens(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    inputs: &Inputs,
    ctx: &ActionContext,
    opts: DispatchOptions<'_, impl ProgressReporter>,
) -> Result<PushRemote> {
    let DispatchOptions {
        reporter,
        home,
        platform,
    } = opts;
    let repo = publish_repo(inputs, ctx);
    let credential = Credential::select(
        &inputs.deploy_key,
        &inputs.github_token,
        &inputs.personal_token,
    )?;

    match credential {
        Credential::DeployKey(key) => {
            let home = home.context("cannot determine home directory")?;
            let session = setup_ssh_key(
                runner,
                fs,
                SshKeyOptions {
                    reporter,
                    deploy_key: &key,
                    publish_repo: &repo,
                    ssh_proxy: &inputs.ssh_proxy,
                    home,
                    platform,
                },
            )
            .await?;
            Ok(PushRemote {
                url: session.remote_url,
                agent_socket: Some(session.agent_socket),
            })
        }
        Credential::PlatformToken(token) => {
            reporter.step("setup GITHUB_TOKEN");
            reporter.debug(&format!("ref: {}", ctx.event.git_ref));
            reporter.debug(&format!("eventName: {}", ctx.event.event_name));
            let url = platform_token_remote(
                &token,
                &repo,
                &inputs.publish_branch,
                &inputs.external_repository,
                &ctx.event,
            )?;
            Ok(PushRemote {
                url,
                agent_socket: None,
            })
        }
        Credential::PersonalToken(token) => {
            reporter.step("setup personal access token");
            Ok(PushRemote {
                url: personal_token_remote(&token, &repo),
                agent_socket: None,
            })
        }
    }
}
