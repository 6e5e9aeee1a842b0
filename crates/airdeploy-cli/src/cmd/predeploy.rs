use super::Cancelled;
use crate::output::print_json;
use airdeploy_core::config::DeployConfig;
use airdeploy_core::prompt::{Outcome, PreDeployPrompt, Step, BANNER};
use airdeploy_core::{paths, secret, DeployError};
use anyhow::Context;
use clap::Args;
use std::io::{BufRead, Write};
use std::path::Path;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Flags shared by `predeploy` and `hook before-package`.
#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    /// Administrator email, used when config.json has to be created
    #[arg(long, env = "AIRDEPLOY_ADMIN_EMAIL")]
    pub admin_email: Option<String>,
    /// Cloud region, used when config.json has to be created
    #[arg(long, env = "AIRDEPLOY_REGION")]
    pub region: Option<String>,
}

impl From<SeedArgs> for Seed {
    fn from(args: SeedArgs) -> Self {
        Seed {
            admin_email: args.admin_email,
            region: args.region,
        }
    }
}

/// Values for fields the prompt does not ask for. Required when config.json
/// does not exist yet; otherwise they replace the stored values.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub admin_email: Option<String>,
    pub region: Option<String>,
}

pub fn run(root: &Path, seed: Seed, json: bool) -> anyhow::Result<()> {
    let stored = match DeployConfig::load(root) {
        Ok(config) => Some(config),
        Err(DeployError::MissingConfig(_)) => None,
        Err(e) => return Err(e).context("failed to load config"),
    };
    if stored.is_none() && (seed.admin_email.is_none() || seed.region.is_none()) {
        anyhow::bail!(
            "{} does not exist; pass --admin-email and --region to create it here, \
             or run 'airdeploy config set'",
            paths::config_path(root).display()
        );
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let current_origin = stored.as_ref().map(|c| c.cors_origin.clone());
    let outcome = drive(stdin.lock(), &mut stdout, current_origin)
        .context("failed to read answer")?;

    let entered = match outcome {
        Outcome::Cancelled => return Err(Cancelled.into()),
        Outcome::Proceed { cors_origin } => cors_origin,
    };

    let config = apply(stored.clone(), entered, seed)?;
    if stored.as_ref() != Some(&config) {
        config.save(root).context("failed to save config")?;
        if stored.is_none() {
            tracing::info!(path = %paths::config_path(root).display(), "created config");
        } else {
            tracing::info!(origin = %config.cors_origin, "updated config");
        }
    }

    let secret_path = paths::secret_path(root);
    secret::write_secret(&secret_path, secret::DEFAULT_SECRET_KEY)
        .with_context(|| format!("failed to write {}", secret_path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "outcome": "proceed",
            "cors_origin": config.cors_origin,
            "secret_path": secret_path,
        }))?;
    } else {
        println!("Created {} with {}", secret_path.display(), secret::DEFAULT_SECRET_KEY);
        println!("Starting deployment process...");
    }
    Ok(())
}

/// Merge the prompt answer and the seed values into the config to persist.
fn apply(
    stored: Option<DeployConfig>,
    entered: Option<String>,
    seed: Seed,
) -> anyhow::Result<DeployConfig> {
    let mut config = match (stored, entered) {
        (Some(config), Some(origin)) => config.with_cors_origin(origin),
        (Some(config), None) => config,
        (None, Some(origin)) => DeployConfig::new(origin, "", ""),
        // The prompt never accepts an empty URL without a stored origin.
        (None, None) => anyhow::bail!("no frontend URL was entered"),
    };
    if let Some(email) = seed.admin_email {
        config.admin_email = email;
    }
    if let Some(region) = seed.region {
        config.region = region;
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Terminal driver
// ---------------------------------------------------------------------------

/// Feed lines from `input` into the prompt until it finishes. EOF cancels.
pub fn drive<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    current_origin: Option<String>,
) -> std::io::Result<Outcome> {
    let mut prompt = PreDeployPrompt::new(current_origin);
    write!(output, "{BANNER}\n{}", prompt.question().unwrap_or_default())?;
    output.flush()?;

    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(prompt.close());
        }
        match prompt.feed(&line) {
            Step::Ask(question) => write!(output, "{question}")?,
            Step::Rejected { message, question } => write!(output, "{message}\n{question}")?,
            Step::Done(outcome) => return Ok(outcome),
        }
        output.flush()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_with(input: &str, origin: Option<&str>) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = drive(Cursor::new(input), &mut out, origin.map(String::from)).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn decline_prints_banner_and_cancels() {
        let (outcome, out) = run_with("n\n", Some("https://app.example.com"));
        assert_eq!(outcome, Outcome::Cancelled);
        assert!(out.contains("Welcome to Air Remote"));
        assert!(out.contains("Do you want to deploy? [Y/n]"));
    }

    #[test]
    fn accept_and_keep_origin() {
        let (outcome, out) = run_with("\n\n", Some("https://app.example.com"));
        assert_eq!(outcome, Outcome::Proceed { cors_origin: None });
        assert!(out.contains("Frontend URL [https://app.example.com]"));
    }

    #[test]
    fn invalid_url_then_valid() {
        let (outcome, out) = run_with("y\nnope\nhttps://new.example.com\n", None);
        assert_eq!(
            outcome,
            Outcome::Proceed {
                cors_origin: Some("https://new.example.com".into())
            }
        );
        assert!(out.contains("invalid origin 'nope'"));
    }

    #[test]
    fn apply_creates_config_from_entered_url_and_seed() {
        let seed = Seed {
            admin_email: Some("admin@example.com".into()),
            region: Some("eu-west-1".into()),
        };
        let config = apply(None, Some("https://app.example.com".into()), seed).unwrap();
        assert_eq!(
            config,
            DeployConfig::new("https://app.example.com", "admin@example.com", "eu-west-1")
        );
    }

    #[test]
    fn apply_keeps_stored_values_without_seed() {
        let stored = DeployConfig::new("https://app.example.com", "admin@example.com", "eu-west-1");
        let config = apply(Some(stored.clone()), None, Seed::default()).unwrap();
        assert_eq!(config, stored);
        let config = apply(Some(stored), Some("https://new.example.com".into()), Seed::default())
            .unwrap();
        assert_eq!(config.cors_origin, "https://new.example.com");
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn apply_seed_overrides_stored_values() {
        let stored = DeployConfig::new("https://app.example.com", "old@example.com", "eu-west-1");
        let seed = Seed {
            admin_email: None,
            region: Some("us-east-1".into()),
        };
        let config = apply(Some(stored), None, seed).unwrap();
        assert_eq!(config.admin_email, "old@example.com");
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn eof_cancels() {
        let (outcome, _) = run_with("y\n", Some("https://app.example.com"));
        assert_eq!(outcome, Outcome::Cancelled);
    }
}
