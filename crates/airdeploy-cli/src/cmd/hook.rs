use super::env::EnvSource;
use crate::output::print_json;
use airdeploy_core::hooks::{self, Hook};
use airdeploy_core::types::Stage;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum HookSubcommand {
    /// Runs before the deployment artifacts are packaged: the pre-deploy prompt
    BeforePackage {
        #[command(flatten)]
        seed: super::predeploy::SeedArgs,
    },

    /// Runs after a successful deploy: regenerate the frontend env file
    AfterDeploy {
        #[arg(long, env = "AIRDEPLOY_STAGE", default_value = "dev")]
        stage: Stage,
    },

    /// Print the hook registration block for the deployment tool config
    Print {
        #[arg(long, env = "AIRDEPLOY_STAGE", default_value = "dev")]
        stage: Stage,
    },
}

pub fn run(root: &Path, subcmd: HookSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        HookSubcommand::BeforePackage { seed } => {
            tracing::info!(hook = %Hook::BeforePackage, "running lifecycle hook");
            super::predeploy::run(root, seed.into(), json)
        }
        HookSubcommand::AfterDeploy { stage } => {
            tracing::info!(hook = %Hook::AfterDeploy, stage = %stage, "running lifecycle hook");
            super::env::run(root, stage, EnvSource::Discover, None, false, json)
        }
        HookSubcommand::Print { stage } => print_json(&hooks::scriptable_hooks(&stage)),
    }
}
