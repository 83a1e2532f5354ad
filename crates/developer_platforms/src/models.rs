//! # Models
//!
//! This module contains the data models used throughout the label gate.
//!
//! These models represent the entities the gate works with: pull request
//! labels, the coordinates of the triggering run, and the trigger event
//! payload. They are designed to be serializable and deserializable to
//! facilitate integration with Git provider APIs.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a label on a pull request.
///
/// # Examples
///
/// ```
/// use label_gate_developer_platforms::models::Label;
///
/// let label = Label {
///     name: "ready-for-review".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// A pull request as it appears in the trigger event payload.
///
/// Only the number is consumed; any other fields in the payload are
/// ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number
    pub number: u64,
}

/// Coordinates of the repository and commit a run was triggered for.
///
/// Read once from the invocation environment and passed explicitly into
/// every operation that needs it; nothing mutates it for the lifetime of
/// the run.
///
/// # Examples
///
/// ```
/// use label_gate_developer_platforms::models::RunContext;
///
/// let context = RunContext {
///     repo_owner: "octocat".to_string(),
///     repo_name: "hello-world".to_string(),
///     sha: "0cd1a9dfbd1e5f56f7b9d3b9dcbbe638e6b85b7c".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunContext {
    /// The owner of the repository
    pub repo_owner: String,

    /// The name of the repository
    pub repo_name: String,

    /// The commit the run was triggered for
    pub sha: String,
}

/// The event payload that triggered the current run.
///
/// Carries the pull request under review when the trigger was a pull
/// request event; other events produce a payload without one.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerPayload {
    /// The pull request the event refers to, if any
    pub pull_request: Option<PullRequest>,
}

impl TriggerPayload {
    /// The number of the pull request the trigger refers to, if any.
    pub fn pull_request_number(&self) -> Option<u64> {
        self.pull_request.as_ref().map(|pr| pr.number)
    }
}
