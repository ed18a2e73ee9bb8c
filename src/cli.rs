use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dronectl::{ApiResponse, Config, DeployAction, DroneClient, RequestBody};

use crate::output::{self, RequestProgress};

#[derive(Parser)]
#[command(name = "dronectl")]
#[command(author, version, about = "Drone CI API client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Drone API base URL (e.g., https://drone.example.com/api)
    #[arg(short, long, global = true, env = "DRONE_SERVER")]
    server: Option<String>,

    /// Personal access token
    #[arg(short, long, global = true, env = "DRONE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file (defaults to ./dronectl.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print response headers
    #[arg(short, long, global = true, default_value_t = false)]
    include: bool,

    /// Print the body exactly as received
    #[arg(short, long, global = true, default_value_t = false)]
    raw: bool,
}

/// `namespace/name` pair identifying a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub namespace: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((namespace, name))
                if !namespace.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(format!("expected <namespace>/<name>, got '{s}'")),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Repository operations
    #[command(subcommand)]
    Repo(RepoCommand),

    /// Build operations
    #[command(subcommand)]
    Build(BuildCommand),

    /// Promote or roll back a build
    #[command(subcommand)]
    Deploy(DeployCommand),

    /// Cron job operations
    #[command(subcommand)]
    Cron(CronCommand),

    /// Step log operations
    #[command(subcommand)]
    Log(LogCommand),

    /// Collaborator operations
    #[command(subcommand)]
    Member(MemberCommand),

    /// Secret operations
    #[command(subcommand)]
    Secret(SecretCommand),

    /// Show the authenticated user
    User,

    /// List build agents
    Nodes,

    /// Local configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the resolved server, token and timeout to a config file
    Init {
        /// Destination (defaults to the user config dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RepoCommand {
    List {
        /// Include each repository's latest build
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        latest: bool,
    },
    Info {
        repo: RepoSlug,
    },
    Enable {
        repo: RepoSlug,
    },
    Disable {
        repo: RepoSlug,
    },
    Update {
        repo: RepoSlug,
        /// JSON object, or @path to a file containing one
        #[arg(short, long)]
        data: String,
    },
    Chown {
        repo: RepoSlug,
    },
    Repair {
        repo: RepoSlug,
    },
}

#[derive(Subcommand)]
enum BuildCommand {
    List {
        repo: RepoSlug,
        #[arg(short, long)]
        page: Option<u32>,
    },
    Info {
        repo: RepoSlug,
        build: String,
    },
    Cancel {
        repo: RepoSlug,
        build: String,
    },
    /// Start a new build from an existing one
    Create {
        repo: RepoSlug,
        build: String,
    },
    Branches {
        repo: RepoSlug,
    },
    Deployments {
        repo: RepoSlug,
    },
    Approve {
        repo: RepoSlug,
        build: String,
        stage: String,
    },
    Decline {
        repo: RepoSlug,
        build: String,
        stage: String,
    },
    /// Recent builds across your repositories
    Recent,
}

#[derive(Subcommand)]
enum DeployCommand {
    Promote {
        repo: RepoSlug,
        build: String,
        target: String,
    },
    Rollback {
        repo: RepoSlug,
        build: String,
        target: String,
    },
}

#[derive(Subcommand)]
enum CronCommand {
    List {
        repo: RepoSlug,
    },
    Info {
        repo: RepoSlug,
        cron: String,
    },
    Create {
        repo: RepoSlug,
        #[arg(short, long)]
        data: String,
    },
    Update {
        repo: RepoSlug,
        cron: String,
        #[arg(short, long)]
        data: String,
    },
    Delete {
        repo: RepoSlug,
        cron: String,
    },
    /// Run the cron job now
    Exec {
        repo: RepoSlug,
        cron: String,
    },
}

#[derive(Subcommand)]
enum LogCommand {
    View {
        repo: RepoSlug,
        build: String,
        stage: String,
        step: String,
    },
    Purge {
        repo: RepoSlug,
        build: String,
        stage: String,
        step: String,
    },
}

#[derive(Subcommand)]
enum MemberCommand {
    List { repo: RepoSlug },
    Info { repo: RepoSlug, user: String },
    Remove { repo: RepoSlug, user: String },
}

#[derive(Subcommand)]
enum SecretCommand {
    List {
        repo: RepoSlug,
    },
    Info {
        repo: RepoSlug,
        secret: String,
    },
    Create {
        repo: RepoSlug,
        #[arg(short, long)]
        data: String,
    },
    Update {
        repo: RepoSlug,
        secret: String,
        #[arg(short, long)]
        data: String,
    },
    Delete {
        repo: RepoSlug,
        secret: String,
    },
}

/// Parses `--data`: an inline JSON object or `@path` to a file holding one.
pub fn parse_body(data: &str) -> Result<RequestBody> {
    let text = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request body from {path}"))?,
        None => data.to_string(),
    };

    serde_json::from_str(&text).context("Request body must be a JSON object")
}

impl Cli {
    /// Merges file configuration with flags and environment; flags win.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(server) = &self.server {
            config.drone.server = Some(server.clone());
        }
        if let Some(token) = &self.token {
            config.drone.token = Some(token.clone());
        }
        if let Some(timeout) = self.timeout {
            config.drone.timeout_secs = timeout;
        }

        Ok(config)
    }

    /// Persists the merged configuration and returns where it was written.
    fn init_config(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config = self.resolve_config()?;
        config.drone.require_server()?;

        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Config::user_config_path()
                .context("Could not determine the user config directory")?,
        };

        config.save(&path)?;
        Ok(path)
    }

    async fn dispatch(&self, client: &DroneClient) -> Result<ApiResponse> {
        let response = match &self.command {
            Commands::Repo(cmd) => match cmd {
                RepoCommand::List { latest } => client.repos(Some(*latest)).await?,
                RepoCommand::Info { repo } => client.repo(&repo.namespace, &repo.name).await?,
                RepoCommand::Enable { repo } => {
                    client.enable_repo(&repo.namespace, &repo.name).await?
                }
                RepoCommand::Disable { repo } => {
                    client.disable_repo(&repo.namespace, &repo.name).await?
                }
                RepoCommand::Update { repo, data } => {
                    let body = parse_body(data)?;
                    client
                        .update_repo(&repo.namespace, &repo.name, &body)
                        .await?
                }
                RepoCommand::Chown { repo } => {
                    client.chown_repo(&repo.namespace, &repo.name).await?
                }
                RepoCommand::Repair { repo } => {
                    client.repair_repo(&repo.namespace, &repo.name).await?
                }
            },
            Commands::Build(cmd) => match cmd {
                BuildCommand::List { repo, page } => {
                    client.builds(&repo.namespace, &repo.name, *page).await?
                }
                BuildCommand::Info { repo, build } => {
                    client.build(&repo.namespace, &repo.name, build).await?
                }
                BuildCommand::Cancel { repo, build } => {
                    client.cancel_build(&repo.namespace, &repo.name, build).await?
                }
                BuildCommand::Create { repo, build } => {
                    client.create_build(&repo.namespace, &repo.name, build).await?
                }
                BuildCommand::Branches { repo } => {
                    client.branches(&repo.namespace, &repo.name).await?
                }
                BuildCommand::Deployments { repo } => {
                    client.deployments(&repo.namespace, &repo.name).await?
                }
                BuildCommand::Approve { repo, build, stage } => {
                    client
                        .approve_stage(&repo.namespace, &repo.name, build, stage)
                        .await?
                }
                BuildCommand::Decline { repo, build, stage } => {
                    client
                        .decline_stage(&repo.namespace, &repo.name, build, stage)
                        .await?
                }
                BuildCommand::Recent => client.recent_builds().await?,
            },
            Commands::Deploy(cmd) => {
                let (repo, build, target, action) = match cmd {
                    DeployCommand::Promote {
                        repo,
                        build,
                        target,
                    } => (repo, build, target, DeployAction::Promote),
                    DeployCommand::Rollback {
                        repo,
                        build,
                        target,
                    } => (repo, build, target, DeployAction::Rollback),
                };
                client
                    .trigger_deployment(&repo.namespace, &repo.name, build, &action, target)
                    .await?
            }
            Commands::Cron(cmd) => match cmd {
                CronCommand::List { repo } => client.crons(&repo.namespace, &repo.name).await?,
                CronCommand::Info { repo, cron } => {
                    client.cron(&repo.namespace, &repo.name, cron).await?
                }
                CronCommand::Create { repo, data } => {
                    let body = parse_body(data)?;
                    client
                        .create_cron(&repo.namespace, &repo.name, &body)
                        .await?
                }
                CronCommand::Update { repo, cron, data } => {
                    let body = parse_body(data)?;
                    client
                        .update_cron(&repo.namespace, &repo.name, cron, &body)
                        .await?
                }
                CronCommand::Delete { repo, cron } => {
                    client.delete_cron(&repo.namespace, &repo.name, cron).await?
                }
                CronCommand::Exec { repo, cron } => {
                    client.exec_cron(&repo.namespace, &repo.name, cron).await?
                }
            },
            Commands::Log(cmd) => match cmd {
                LogCommand::View {
                    repo,
                    build,
                    stage,
                    step,
                } => {
                    client
                        .logs(&repo.namespace, &repo.name, build, stage, step)
                        .await?
                }
                LogCommand::Purge {
                    repo,
                    build,
                    stage,
                    step,
                } => {
                    client
                        .purge_logs(&repo.namespace, &repo.name, build, stage, step)
                        .await?
                }
            },
            Commands::Member(cmd) => match cmd {
                MemberCommand::List { repo } => client.members(&repo.namespace, &repo.name).await?,
                MemberCommand::Info { repo, user } => {
                    client.member(&repo.namespace, &repo.name, user).await?
                }
                MemberCommand::Remove { repo, user } => {
                    client.delete_member(&repo.namespace, &repo.name, user).await?
                }
            },
            Commands::Secret(cmd) => match cmd {
                SecretCommand::List { repo } => client.secrets(&repo.namespace, &repo.name).await?,
                SecretCommand::Info { repo, secret } => {
                    client.secret(&repo.namespace, &repo.name, secret).await?
                }
                SecretCommand::Create { repo, data } => {
                    let body = parse_body(data)?;
                    client
                        .create_secret(&repo.namespace, &repo.name, &body)
                        .await?
                }
                SecretCommand::Update { repo, secret, data } => {
                    let body = parse_body(data)?;
                    client
                        .update_secret(&repo.namespace, &repo.name, secret, &body)
                        .await?
                }
                SecretCommand::Delete { repo, secret } => {
                    client.delete_secret(&repo.namespace, &repo.name, secret).await?
                }
            },
            Commands::User => client.user().await?,
            Commands::Nodes => client.nodes().await?,
            Commands::Config(_) => bail!("config commands do not contact the server"),
        };

        Ok(response)
    }

    pub async fn execute(&self) -> Result<()> {
        if let Commands::Config(ConfigCommand::Init { path }) = &self.command {
            let path = self.init_config(path.as_deref())?;
            info!("Wrote configuration to {}", path.display());
            eprintln!("Saved configuration to {}", path.display());
            return Ok(());
        }

        let config = self.resolve_config()?;
        let client = DroneClient::from_config(&config.drone)?;
        info!("Using Drone server: {}", client.server());

        let progress = RequestProgress::start();
        let response = self.dispatch(&client).await;
        progress.finish();

        let response = response?;
        debug!("Received {} bytes", response.body().len());

        output::print_response(&response, self.include, self.raw)?;

        if !response.is_success() {
            bail!("Drone responded with {}", response.status());
        }

        Ok(())
    }
}
