//! Deployment-tool lifecycle extension points.
//!
//! The host tool calls back into `airdeploy hook <name>` at two events. The
//! work itself lives in the other modules; this only names the events and
//! renders the registration block the host config expects.

use crate::types::Stage;
use serde::Serialize;
use std::fmt;

pub const BIN_NAME: &str = "airdeploy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    BeforePackage,
    AfterDeploy,
}

impl Hook {
    pub fn all() -> &'static [Hook] {
        &[Hook::BeforePackage, Hook::AfterDeploy]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::BeforePackage => "before-package",
            Hook::AfterDeploy => "after-deploy",
        }
    }

    /// Lifecycle event name in the host tool.
    pub fn event(&self) -> &'static str {
        match self {
            Hook::BeforePackage => "before:package:createDeploymentArtifacts",
            Hook::AfterDeploy => "after:deploy:deploy",
        }
    }

    pub fn command(&self, stage: &Stage) -> String {
        match self {
            Hook::BeforePackage => format!("{BIN_NAME} hook {}", self.as_str()),
            Hook::AfterDeploy => format!("{BIN_NAME} hook {} --stage {stage}", self.as_str()),
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{"scriptable": {"hooks": {<event>: <command>, ...}}}` for the host config.
pub fn scriptable_hooks(stage: &Stage) -> serde_json::Value {
    let hooks: serde_json::Map<String, serde_json::Value> = Hook::all()
        .iter()
        .map(|h| (h.event().to_string(), serde_json::Value::String(h.command(stage))))
        .collect();
    serde_json::json!({ "scriptable": { "hooks": hooks } })
}
