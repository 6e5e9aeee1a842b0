mod cmd;
mod output;
mod root;

use airdeploy_core::types::Stage;
use clap::{Parser, Subcommand};
use cmd::{
    admin::AdminSubcommand, config::ConfigSubcommand, env::EnvSource, hook::HookSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "airdeploy",
    about = "Deploy helper: pre-deploy checks, secrets and frontend env generation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Service root (default: auto-detect from config.json, serverless config or .git/)
    #[arg(long, global = true, env = "AIRDEPLOY_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Confirm the deployment, set the frontend URL, and write a fresh JWT secret
    Predeploy {
        #[command(flatten)]
        seed: cmd::predeploy::SeedArgs,
    },

    /// Write a fresh secret file
    Secret {
        /// Variable name written to the file
        #[arg(long, default_value = airdeploy_core::secret::DEFAULT_SECRET_KEY)]
        key: String,
        /// Destination (default: <root>/.env)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Generate the frontend env file for a stage
    Env {
        #[arg(long, env = "AIRDEPLOY_STAGE", default_value = "dev")]
        stage: Stage,
        /// Read deployment status text from a file ("-" for stdin)
        #[arg(long, conflicts_with = "discover")]
        status_file: Option<PathBuf>,
        /// Ask the deployment tool for live endpoints
        #[arg(long)]
        discover: bool,
        /// Destination (default: <root>/outputs/.env)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the file instead of writing it
        #[arg(long)]
        print: bool,
    },

    /// Inspect and modify config.json
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Administrator bootstrap
    Admin {
        #[command(subcommand)]
        subcommand: AdminSubcommand,
    },

    /// Lifecycle entry points called by the deployment tool
    Hook {
        #[command(subcommand)]
        subcommand: HookSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Hook { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Predeploy { seed } => cmd::predeploy::run(&root, seed.into(), cli.json),
        Commands::Secret { key, path } => cmd::secret::run(&root, &key, path.as_deref(), cli.json),
        Commands::Env {
            stage,
            status_file,
            discover,
            output,
            print,
        } => {
            let source = match (status_file, discover) {
                (Some(path), _) => EnvSource::StatusFile(path),
                (None, true) => EnvSource::Discover,
                (None, false) => EnvSource::Config,
            };
            cmd::env::run(&root, stage, source, output.as_deref(), print, cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Admin { subcommand } => cmd::admin::run(&root, subcommand, cli.json),
        Commands::Hook { subcommand } => cmd::hook::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        if e.is::<cmd::Cancelled>() {
            println!("Deployment cancelled.");
        } else {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
        }
        std::process::exit(1);
    }
}
