//! # Label Gate Core
//!
//! Core logic for gating a pull request on the presence of at least one
//! label drawn from an allow-list hosted in the repository under review.
//!
//! The gate fetches the labels currently attached to a pull request and a
//! YAML document listing acceptable label names, then checks whether the
//! two sets intersect. The result is reported to the caller; whether a
//! failing outcome also fails the run is the caller's decision.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use label_gate_core::LabelGate;
//! use label_gate_developer_platforms::errors::Error;
//! use label_gate_developer_platforms::models::{Label, RunContext};
//! use label_gate_developer_platforms::{ConfigFetcher, PullRequestProvider};
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl PullRequestProvider for MyProvider {
//!     async fn list_labels(&self, _: &RunContext, _: u64) -> Result<Vec<Label>, Error> {
//!         // Implementation to fetch labels from the platform API
//!         // ...
//!         # unimplemented!()
//!     }
//! }
//!
//! #[async_trait]
//! impl ConfigFetcher for MyProvider {
//!     async fn fetch_config(&self, _: &RunContext, _: &str) -> Result<Option<String>, Error> {
//!         // Implementation to fetch file content from the platform API
//!         // ...
//!         # unimplemented!()
//!     }
//! }
//!
//! async fn example() -> anyhow::Result<()> {
//!     let gate = LabelGate::new(MyProvider);
//!
//!     let context = RunContext {
//!         repo_owner: "octocat".to_string(),
//!         repo_name: "hello-world".to_string(),
//!         sha: "0cd1a9dfbd1e5f56f7b9d3b9dcbbe638e6b85b7c".to_string(),
//!     };
//!
//!     let result = gate
//!         .check_pull_request(&context, 123, ".github/acceptable-labels.yml")
//!         .await?;
//!
//!     if result.outcome.is_satisfied() {
//!         println!("PR carries an acceptable label");
//!     } else {
//!         println!("PR is missing an acceptable label");
//!     }
//!
//!     Ok(())
//! }
//! ```

use label_gate_developer_platforms::models::{Label, RunContext};
use label_gate_developer_platforms::{ConfigFetcher, PullRequestProvider};
use tracing::{debug, error, info, instrument, warn};

pub mod allowlist;
pub mod errors;
pub mod gate;

use allowlist::AllowList;
use errors::LabelGateError;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Result of checking a pull request against the allow-list.
#[derive(Debug, Clone)]
pub struct GateResult {
    /// The pull request that was checked
    pub pull_request: u64,

    /// Labels found on the pull request, in the order the provider
    /// returned them
    pub labels: Vec<String>,

    /// Outcome of the gate evaluation
    pub outcome: GateOutcome,
}

/// Outcome of a single gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The allow-list could not be found or has no entries; the gate does
    /// not apply and the run terminates successfully.
    AllowListEmpty,

    /// At least one label on the pull request appears in the allow-list.
    Satisfied,

    /// None of the labels on the pull request appear in the allow-list.
    NotSatisfied,
}

impl GateOutcome {
    /// True when the gate was evaluated and found an acceptable label.
    pub fn is_satisfied(&self) -> bool {
        matches!(self, GateOutcome::Satisfied)
    }
}

/// Main struct for checking pull request labels against an allow-list.
///
/// `LabelGate` reads the pull request's labels and the repository-hosted
/// allow-list through an injected provider, then evaluates the
/// intersection.
#[derive(Debug)]
pub struct LabelGate<P: PullRequestProvider + ConfigFetcher + std::fmt::Debug> {
    provider: P,
}

impl<P: PullRequestProvider + ConfigFetcher + std::fmt::Debug> LabelGate<P> {
    /// Creates a new `LabelGate` instance backed by the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Checks whether the pull request carries at least one label from the
    /// allow-list at `config_path`.
    ///
    /// The two reads happen sequentially: labels first, then the
    /// allow-list document. A missing or empty allow-list short-circuits
    /// the evaluation with [`GateOutcome::AllowListEmpty`].
    ///
    /// # Arguments
    ///
    /// * `context` - The repository coordinates and commit of the current run
    /// * `pr_number` - The pull request number
    /// * `config_path` - Repository-relative path to the allow-list document
    ///
    /// # Returns
    ///
    /// A `Result` containing a `GateResult` with the labels found and the
    /// evaluation outcome
    #[instrument]
    pub async fn check_pull_request(
        &self,
        context: &RunContext,
        pr_number: u64,
        config_path: &str,
    ) -> Result<GateResult, LabelGateError> {
        debug!(
            repository_owner = context.repo_owner.as_str(),
            repository = context.repo_name.as_str(),
            pull_request = pr_number,
            "Fetching labels for pull request",
        );

        let labels = self.fetch_labels(context, pr_number).await?;
        if labels.is_empty() {
            // Reported in the logs only; an unlabelled pull request does
            // not fail the run.
            warn!(
                pull_request = pr_number,
                "No labels found for pull request",
            );
        }

        let allow_list = self.fetch_allow_list(context, config_path).await?;
        if allow_list.is_empty() {
            info!(
                path = config_path,
                "Could not find a list of label names at the configuration path",
            );
            return Ok(GateResult {
                pull_request: pr_number,
                labels: labels.into_iter().map(|l| l.name).collect(),
                outcome: GateOutcome::AllowListEmpty,
            });
        }

        let outcome = if gate::evaluate(&labels, &allow_list) {
            GateOutcome::Satisfied
        } else {
            GateOutcome::NotSatisfied
        };

        info!(
            pull_request = pr_number,
            satisfied = outcome.is_satisfied(),
            "Evaluated the label gate",
        );

        Ok(GateResult {
            pull_request: pr_number,
            labels: labels.into_iter().map(|l| l.name).collect(),
            outcome,
        })
    }

    /// Fetches the labels currently attached to the pull request,
    /// preserving the order the provider returned them in.
    async fn fetch_labels(
        &self,
        context: &RunContext,
        pr_number: u64,
    ) -> Result<Vec<Label>, LabelGateError> {
        let labels = self
            .provider
            .list_labels(context, pr_number)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.repo_owner.as_str(),
                    repository = context.repo_name.as_str(),
                    pull_request = pr_number,
                    error = e.to_string(),
                    "Failed to list the labels on the PR"
                );

                LabelGateError::GitProviderError(format!(
                    "Failed to list labels for the PR with number [{}] in {}/{}",
                    pr_number, context.repo_owner, context.repo_name
                ))
            })?;

        if !labels.is_empty() {
            debug!(count = labels.len(), "found labels:");
            for label in &labels {
                debug!("  {}", label.name);
            }
        }

        Ok(labels)
    }

    /// Fetches and parses the allow-list document. An absent file yields
    /// an empty allow-list; a present but malformed one is an error.
    async fn fetch_allow_list(
        &self,
        context: &RunContext,
        config_path: &str,
    ) -> Result<AllowList, LabelGateError> {
        let content = self
            .provider
            .fetch_config(context, config_path)
            .await
            .map_err(|e| {
                error!(
                    repository_owner = context.repo_owner.as_str(),
                    repository = context.repo_name.as_str(),
                    path = config_path,
                    error = e.to_string(),
                    "Failed to fetch the allow-list configuration file"
                );

                LabelGateError::GitProviderError(format!(
                    "Failed to fetch the configuration file at {} in {}/{}",
                    config_path, context.repo_owner, context.repo_name
                ))
            })?;

        match content {
            Some(text) => AllowList::parse(&text),
            None => Ok(AllowList::default()),
        }
    }
}
