//! Resolution of the run's inputs and trigger context.
//!
//! The CI runner provides inputs through environment variables; flags
//! override them for local use. The trigger event payload is a JSON
//! document on disk whose path the runner supplies.

use std::env;
use std::fs;

use label_gate_developer_platforms::models::{RunContext, TriggerPayload};
use tracing::debug;

use crate::errors::CliError;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Environment variable holding the bearer token input.
const REPO_TOKEN_ENV: &str = "INPUT_REPO-TOKEN";

/// Environment variable holding the allow-list path input.
const CONFIGURATION_PATH_ENV: &str = "INPUT_CONFIGURATION-PATH";

/// Environment variable holding the path to the trigger event payload.
const EVENT_PATH_ENV: &str = "GITHUB_EVENT_PATH";

/// Environment variable holding the `owner/name` repository slug.
const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Environment variable holding the commit the run was triggered for.
const SHA_ENV: &str = "GITHUB_SHA";

/// The resolved required inputs for one run.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    /// Bearer token for the platform API
    pub repo_token: String,

    /// Repository-relative path to the allow-list document
    pub configuration_path: String,

    /// Path to the JSON trigger event payload on disk
    pub event_path: String,
}

impl ActionInputs {
    /// Resolves the inputs, preferring explicit values over the
    /// environment variables the runner provides. A missing required
    /// input is an error.
    pub fn resolve(
        repo_token: Option<String>,
        configuration_path: Option<String>,
        event_path: Option<String>,
    ) -> Result<Self, CliError> {
        Ok(Self {
            repo_token: required(repo_token, REPO_TOKEN_ENV)?,
            configuration_path: required(configuration_path, CONFIGURATION_PATH_ENV)?,
            event_path: required(event_path, EVENT_PATH_ENV)?,
        })
    }
}

/// Takes the explicit value when present, otherwise reads the named
/// environment variable. An empty value counts as missing.
fn required(explicit: Option<String>, env_name: &str) -> Result<String, CliError> {
    let value = match explicit {
        Some(v) => v,
        None => env::var(env_name).unwrap_or_default(),
    };

    if value.is_empty() {
        return Err(CliError::InvalidArguments(format!(
            "Input required and not supplied: {}",
            env_name
        )));
    }

    Ok(value)
}

/// Reads the repository coordinates and commit for this run from the
/// environment.
pub fn run_context_from_env() -> Result<RunContext, CliError> {
    let repository = env::var(REPOSITORY_ENV).map_err(|_| {
        CliError::InvalidArguments(format!(
            "Input required and not supplied: {}",
            REPOSITORY_ENV
        ))
    })?;
    let (repo_owner, repo_name) = split_repository(&repository)?;

    let sha = env::var(SHA_ENV).map_err(|_| {
        CliError::InvalidArguments(format!("Input required and not supplied: {}", SHA_ENV))
    })?;

    Ok(RunContext {
        repo_owner,
        repo_name,
        sha,
    })
}

/// Splits an `owner/name` repository slug into its two parts.
fn split_repository(slug: &str) -> Result<(String, String), CliError> {
    let parts: Vec<&str> = slug.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(CliError::InvalidArguments(format!(
            "Expected an owner/name repository slug, got '{}'",
            slug
        )));
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Loads and parses the trigger event payload from disk.
pub fn load_trigger_payload(path: &str) -> Result<TriggerPayload, CliError> {
    debug!(path = path, "Loading trigger event payload");
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::ConfigError(format!(
            "Failed to read the event payload at {}: {}",
            path, e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        CliError::ConfigError(format!(
            "Failed to parse the event payload at {}: {}",
            path, e
        ))
    })
}
