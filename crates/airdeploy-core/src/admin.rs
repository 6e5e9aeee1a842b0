//! Administrator bootstrap: one record in the stage's registered-users table.

use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use crate::types::Stage;
use serde::Serialize;
use std::path::PathBuf;
use std::process::{Command, Stdio};

pub const AWS_CLI: &str = "aws";
pub const USER_EMAIL_ATTR: &str = "userEmail";
const TABLE_SUFFIX: &str = "RegisteredUsers";

/// Where the admin record ends up.
pub trait RecordStore {
    /// Insert one record with a single string attribute. Called once per run.
    fn put_record(&self, table: &str, region: &str, attribute: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRecord {
    pub table: String,
    pub region: String,
    pub user_email: String,
}

pub fn registered_users_table(stage: &str) -> Result<String> {
    if stage.trim().is_empty() {
        return Err(DeployError::EmptyTableName);
    }
    Ok(format!("{stage}{TABLE_SUFFIX}"))
}

pub fn register_admin(
    store: &dyn RecordStore,
    config: &DeployConfig,
    stage: &Stage,
) -> Result<AdminRecord> {
    let table = registered_users_table(stage.as_str())?;
    tracing::info!(table = %table, region = %config.region, "registering administrator");
    store.put_record(&table, &config.region, USER_EMAIL_ATTR, &config.admin_email)?;
    Ok(AdminRecord {
        table,
        region: config.region.clone(),
        user_email: config.admin_email.clone(),
    })
}

// ---------------------------------------------------------------------------
// AWS CLI store
// ---------------------------------------------------------------------------

/// Shells out to `aws dynamodb put-item`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsCliStore;

impl AwsCliStore {
    fn bin() -> Result<PathBuf> {
        which::which(AWS_CLI).map_err(|_| DeployError::ToolNotInstalled(AWS_CLI.to_string()))
    }
}

/// DynamoDB attribute-value JSON for a single string attribute.
pub fn item_json(attribute: &str, value: &str) -> String {
    serde_json::json!({ attribute: { "S": value } }).to_string()
}

impl RecordStore for AwsCliStore {
    fn put_record(&self, table: &str, region: &str, attribute: &str, value: &str) -> Result<()> {
        let bin = Self::bin()?;
        let item = item_json(attribute, value);
        let output = Command::new(&bin)
            .args([
                "dynamodb",
                "put-item",
                "--table-name",
                table,
                "--region",
                region,
                "--item",
                &item,
            ])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DeployError::ToolFailed {
                tool: AWS_CLI.to_string(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeployError::ToolFailed {
                tool: AWS_CLI.to_string(),
                message: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
