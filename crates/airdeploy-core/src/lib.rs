pub mod admin;
pub mod config;
pub mod deploy_tool;
pub mod endpoints;
pub mod envfile;
pub mod error;
pub mod extract;
pub mod hooks;
pub mod io;
pub mod paths;
pub mod prompt;
pub mod secret;
pub mod types;

pub use error::{DeployError, Result};
