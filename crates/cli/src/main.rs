//! # Label Gate CLI
//!
//! Command-line interface for gating a pull request on the presence of at
//! least one label drawn from a repository-hosted allow-list.
//!
//! The binary is designed to run inside a CI job. The access token and
//! the allow-list path come from the invocation environment (or from
//! flags, for local use), the triggering event payload supplies the pull
//! request under review, and the outcome is written to the logs.
//!
//! By default the run always reports success: the gate outcome, an empty
//! label set, and even internal errors are logged without failing the
//! run. Pass `--enforce` to turn an unsatisfied gate or a run error into
//! a failing exit code.
//!
//! # Examples
//!
//! ```bash
//! # As the CI runner invokes it (inputs come from the environment)
//! label-gate
//!
//! # Locally, with explicit flags
//! label-gate --repo-token <token> \
//!     --configuration-path .github/acceptable-labels.yml \
//!     --event-path event.json
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, instrument, warn};

/// Resolution of inputs and trigger context for the run.
mod context;

/// Error types specific to the CLI.
mod errors;

use context::{load_trigger_payload, run_context_from_env, ActionInputs};
use errors::CliError;
use label_gate_core::errors::LabelGateError;
use label_gate_core::{GateOutcome, LabelGate};
use label_gate_developer_platforms::github::{create_token_client, GitHubProvider};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command-line interface structure for the label gate.
///
/// Every input can be supplied as a flag; when a flag is absent the value
/// is read from the environment variable the CI runner provides.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bearer token used to authenticate against the platform API.
    /// Falls back to the `INPUT_REPO-TOKEN` environment variable.
    #[arg(long)]
    repo_token: Option<String>,

    /// Repository-relative path to the YAML allow-list.
    /// Falls back to `INPUT_CONFIGURATION-PATH`.
    #[arg(long)]
    configuration_path: Option<String>,

    /// Path to the JSON event payload that triggered the run.
    /// Falls back to `GITHUB_EVENT_PATH`.
    #[arg(long)]
    event_path: Option<String>,

    /// Fail the run when the gate is not satisfied or an error occurs.
    ///
    /// Off by default: the gate outcome is computed and logged, but the
    /// run always reports success.
    #[arg(long)]
    enforce: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// What a completed run found.
#[derive(Debug)]
enum RunOutcome {
    /// The trigger did not reference a pull request; nothing to check.
    NoPullRequest,

    /// The allow-list was missing or empty; the gate does not apply.
    AllowListEmpty,

    /// The gate was evaluated for a pull request.
    Evaluated {
        /// The pull request that was checked
        pull_request: u64,

        /// Whether an acceptable label was found
        satisfied: bool,
    },
}

/// Main entry point for the label gate.
///
/// This function initializes logging, parses command-line arguments, runs
/// the gate, and applies the enforcement policy to the outcome.
///
/// # Returns
///
/// Returns `Ok(())` on every path unless `--enforce` is set; with
/// enforcement an unsatisfied gate or a run error becomes a `CliError`
/// and a failing exit code.
#[tokio::main]
#[instrument]
async fn main() -> Result<(), CliError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("LABEL_GATE_LOG"))
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set verbose logging if requested
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli).await {
        Ok(RunOutcome::NoPullRequest) => Ok(()),
        Ok(RunOutcome::AllowListEmpty) => Ok(()),
        Ok(RunOutcome::Evaluated {
            pull_request,
            satisfied,
        }) => {
            if satisfied {
                info!(
                    pull_request = pull_request,
                    "Pull request carries an acceptable label"
                );
                return Ok(());
            }

            warn!(
                pull_request = pull_request,
                "None of the required labels were found on the pull request"
            );
            if cli.enforce {
                return Err(CliError::GateFailed(format!(
                    "None of the required labels were found on pr #{}",
                    pull_request
                )));
            }

            // Failure signalling stays disabled unless explicitly requested.
            Ok(())
        }
        Err(e) => {
            error!("Error checking pull request labels: {}", e);
            if cli.enforce {
                return Err(e);
            }

            // Errors are logged but do not fail the run either.
            Ok(())
        }
    }
}

/// Executes one gate run.
///
/// Resolves the required inputs, loads the trigger payload, and exits
/// early, before any network call, when the trigger carries no pull
/// request. Otherwise builds the authenticated client and checks the
/// pull request's labels against the allow-list.
#[instrument(skip(cli))]
async fn run(cli: &Cli) -> Result<RunOutcome, CliError> {
    let inputs = ActionInputs::resolve(
        cli.repo_token.clone(),
        cli.configuration_path.clone(),
        cli.event_path.clone(),
    )?;

    let payload = load_trigger_payload(&inputs.event_path)?;
    let Some(pr_number) = payload.pull_request_number() else {
        info!("Could not get pull request from context, exiting");
        return Ok(RunOutcome::NoPullRequest);
    };

    let context = run_context_from_env()?;

    let client = create_token_client(&inputs.repo_token)
        .map_err(|e| CliError::AuthError(format!("Failed to create the API client: {}", e)))?;
    let provider = GitHubProvider::new(client);
    let gate = LabelGate::new(provider);

    debug!(pull_request = pr_number, "fetching labels for pr");
    let result = gate
        .check_pull_request(&context, pr_number, &inputs.configuration_path)
        .await
        .map_err(|e| match e {
            LabelGateError::ConfigError(message) => CliError::ConfigError(message),
            LabelGateError::InvalidAllowList(message) => CliError::ConfigError(message),
            LabelGateError::GitProviderError(message) => CliError::NetworkError(message),
        })?;

    match result.outcome {
        GateOutcome::AllowListEmpty => Ok(RunOutcome::AllowListEmpty),
        GateOutcome::Satisfied => Ok(RunOutcome::Evaluated {
            pull_request: pr_number,
            satisfied: true,
        }),
        GateOutcome::NotSatisfied => Ok(RunOutcome::Evaluated {
            pull_request: pr_number,
            satisfied: false,
        }),
    }
}
