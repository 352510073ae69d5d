//! CLI argument parsing with clap derive
//!
//! Every input can also come from the environment variable the CI runner
//! sets for it (`INPUT_*` for action inputs, `GITHUB_*` for run context).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::application::services::dispatch::{
    ActionContext, DispatchOptions, Inputs, publish_repo, set_tokens,
};
use crate::application::services::ssh_bootstrap::HostPlatform;
use crate::domain::credential::EventContext;
use crate::domain::publish_repo::RepoSlug;
use crate::domain::ssh::AGENT_SOCKET_ENV;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::github_env;
use crate::output::{OutputContext, TerminalReporter, json};

/// Authenticate git push for a publishing action
#[derive(Parser)]
#[command(
    name = "publish-auth",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Configure credentials and print the remote to push to
    Setup(SetupArgs),

    /// Print the repository a push would target (host/owner/repo)
    Resolve(RepoArgs),
}

/// Where the push goes.
#[derive(Args)]
pub struct RepoArgs {
    /// Repository that triggered the run, as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Server the triggering repository lives on
    #[arg(long, env = "GITHUB_SERVER_URL", default_value = "https://github.com")]
    pub server_url: String,

    /// Push to this repository instead (owner/repo or host/owner/repo)
    #[arg(long, env = "INPUT_EXTERNAL_REPOSITORY", default_value = "")]
    pub external_repository: String,
}

/// Credentials and run context for `setup`.
#[derive(Args)]
pub struct SetupArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// SSH private key with push access
    #[arg(
        long,
        env = "INPUT_DEPLOY_KEY",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub deploy_key: String,

    /// Token issued to the run (GITHUB_TOKEN)
    #[arg(
        long,
        env = "INPUT_GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub github_token: String,

    /// Personal access token
    #[arg(
        long,
        env = "INPUT_PERSONAL_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub personal_token: String,

    /// Branch the content is published to
    #[arg(long, env = "INPUT_PUBLISH_BRANCH", default_value = "gh-pages")]
    pub publish_branch: String,

    /// Scan and connect through this SSH endpoint (host[:port])
    #[arg(long, env = "INPUT_SSH_PROXY", default_value = "")]
    pub ssh_proxy: String,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "")]
    pub event_name: String,

    /// Ref of the triggering event
    #[arg(long = "ref", env = "GITHUB_REF", default_value = "")]
    pub git_ref: String,

    /// Environment file read by later job steps
    #[arg(long, env = "GITHUB_ENV")]
    pub github_env: Option<PathBuf>,
}

impl SetupArgs {
    fn inputs(&self) -> Inputs {
        Inputs {
            deploy_key: self.deploy_key.clone(),
            github_token: self.github_token.clone(),
            personal_token: self.personal_token.clone(),
            publish_branch: self.publish_branch.clone(),
            external_repository: self.repo.external_repository.clone(),
            ssh_proxy: self.ssh_proxy.clone(),
        }
    }

    fn context(&self) -> Result<ActionContext> {
        Ok(ActionContext {
            server_url: self.repo.server_url.clone(),
            repository: RepoSlug::parse(&self.repo.repository)?,
            event: EventContext {
                event_name: self.event_name.clone(),
                git_ref: self.git_ref.clone(),
            },
        })
    }
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let ctx = OutputContext::new(no_color, quiet);
        match command {
            Command::Setup(args) => setup(&ctx, &args, json).await,
            Command::Resolve(args) => resolve(&args, json),
        }
    }
}

async fn setup(ctx: &OutputContext, args: &SetupArgs, json: bool) -> Result<()> {
    let reporter = TerminalReporter::new(ctx);
    let action = args.context()?;
    let home = dirs::home_dir();
    let remote = set_tokens(
        &TokioCommandRunner,
        &LocalFs,
        &args.inputs(),
        &action,
        DispatchOptions {
            reporter: &reporter,
            home: home.as_deref(),
            platform: HostPlatform::current(),
        },
    )
    .await?;

    if let (Some(socket), Some(env_file)) = (&remote.agent_socket, &args.github_env) {
        github_env::export_variable(env_file, AGENT_SOCKET_ENV, &socket.to_string_lossy())?;
    }

    if json {
        println!("{}", json::format_remote(&remote)?);
    } else {
        println!("{}", remote.url);
    }
    Ok(())
}

fn resolve(args: &RepoArgs, json: bool) -> Result<()> {
    let slug = RepoSlug::parse(&args.repository)?;
    let inputs = Inputs {
        external_repository: args.external_repository.clone(),
        ..Inputs::default()
    };
    let action = ActionContext {
        server_url: args.server_url.clone(),
        repository: slug,
        event: EventContext::default(),
    };
    let repo = publish_repo(&inputs, &action);
    if json {
        println!("{}", serde_json::json!({ "publish_repo": repo }));
    } else {
        println!("{repo}");
    }
    Ok(())
}
