use crate::output::{print_json, print_settings};
use airdeploy_core::config::{DeployConfig, WarnLevel};
use airdeploy_core::{paths, DeployError};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the stored configuration
    Show,

    /// Create or update config.json
    Set {
        /// Public frontend URL (CORS origin)
        #[arg(long)]
        cors_origin: Option<String>,
        /// Administrator email registered by 'admin register'
        #[arg(long)]
        admin_email: Option<String>,
        /// Cloud region (e.g. eu-west-1)
        #[arg(long)]
        region: Option<String>,
    },

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Set {
            cors_origin,
            admin_email,
            region,
        } => set(root, cors_origin, admin_email, region, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = DeployConfig::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    let mut settings = vec![
        ("corsOrigin".to_string(), config.cors_origin.clone()),
        ("adminEmail".to_string(), config.admin_email.clone()),
        ("region".to_string(), config.region.clone()),
    ];
    // Keys owned by the deployment tool are shown after ours, compact.
    for (key, value) in &config.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        settings.push((key.clone(), value));
    }
    print_settings(&settings);
    Ok(())
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn set(
    root: &Path,
    cors_origin: Option<String>,
    admin_email: Option<String>,
    region: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let config = match DeployConfig::load(root) {
        Ok(mut existing) => {
            if let Some(v) = cors_origin {
                existing.cors_origin = v;
            }
            if let Some(v) = admin_email {
                existing.admin_email = v;
            }
            if let Some(v) = region {
                existing.region = v;
            }
            existing
        }
        Err(DeployError::MissingConfig(_)) => match (cors_origin, admin_email, region) {
            (Some(c), Some(a), Some(r)) => DeployConfig::new(c, a, r),
            _ => anyhow::bail!(
                "{} does not exist; pass --cors-origin, --admin-email and --region to create it",
                paths::config_path(root).display()
            ),
        },
        Err(e) => return Err(e).context("failed to load config"),
    };

    config.save(root).context("failed to save config")?;

    if json {
        print_json(&config)?;
    } else {
        println!("saved {}", paths::config_path(root).display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = DeployConfig::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
