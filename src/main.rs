use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use git_tools_lib::config::{ConfigLoader, ConfigOverrides};
use git_tools_lib::server::{self, ServerAppState};
use git_tools_lib::shutdown::{register_signal_handlers, ShutdownState};

/// git-tools - version-control operations exposed as tools for agents
#[derive(Parser, Debug)]
#[command(name = "git-tools")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/git-tools/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repository used when a tool call omits repo_path
    #[arg(long, env = "REPO_PATH")]
    repo_path: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[arg(long)]
    bind: Option<String>,

    /// Port to bind the HTTP server to
    #[arg(long, env = "GIT_TOOLS_PORT")]
    port: Option<u16>,

    /// Serve line-delimited JSON over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let loader = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };

    let config = loader
        .load()
        .context("Failed to load configuration")?
        .apply_overrides(ConfigOverrides {
            default_repo_path: cli.repo_path,
            bind: cli.bind,
            port: cli.port,
        });

    if let Some(path) = loader.config_path() {
        log::debug!("Config path: {}", path.display());
    }

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    rt.block_on(async {
        let shutdown_state = ShutdownState::new();
        if let Err(e) = register_signal_handlers(shutdown_state.clone()) {
            log::warn!("Failed to register signal handlers: {}", e);
        }

        let state = ServerAppState::new(config.tool_state(), shutdown_state);

        let result = if cli.stdio {
            server::run_stdio(state).await
        } else {
            server::run_server(state, &config.server).await
        };
        result.map_err(|e| anyhow!(e))
    })
}
