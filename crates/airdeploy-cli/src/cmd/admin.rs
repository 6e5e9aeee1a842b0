use crate::output::print_json;
use airdeploy_core::admin::{self, AwsCliStore};
use airdeploy_core::config::DeployConfig;
use airdeploy_core::types::Stage;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum AdminSubcommand {
    /// Put the configured admin email into the stage's registered-users table
    Register {
        #[arg(long, env = "AIRDEPLOY_STAGE", default_value = "dev")]
        stage: Stage,
    },
}

pub fn run(root: &Path, subcmd: AdminSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AdminSubcommand::Register { stage } => register(root, &stage, json),
    }
}

fn register(root: &Path, stage: &Stage, json: bool) -> anyhow::Result<()> {
    let config = DeployConfig::load(root).context("failed to load config")?;
    let record = match admin::register_admin(&AwsCliStore, &config, stage) {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(error = %e, stage = %stage, "admin registration failed");
            return Err(e).context("failed to register administrator");
        }
    };

    if json {
        print_json(&record)?;
    } else {
        println!(
            "registered {} in {} ({})",
            record.user_email, record.table, record.region
        );
    }
    Ok(())
}
