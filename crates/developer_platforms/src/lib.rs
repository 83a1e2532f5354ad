use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{Label, RunContext};

/// Trait to fetch configuration files from remote repositories.
///
/// The file is read at the commit the run was triggered for, so the gate
/// always sees the allow-list as it exists on the change under review.
#[async_trait]
pub trait ConfigFetcher: Sync + Send {
    /// Fetch the content of a configuration file at the given path.
    /// Returns Ok(Some(content)) if found, Ok(None) if not found, or Err on error.
    async fn fetch_config(&self, context: &RunContext, path: &str)
        -> Result<Option<String>, Error>;
}

/// Trait for interacting with developer platforms that provide pull requests (e.g., GitHub, GitLab).
///
/// Implementations of this trait provide the functionality the label gate
/// needs from a Git provider: reading the labels currently attached to a
/// pull request.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use label_gate_developer_platforms::{PullRequestProvider, errors::Error, models::{Label, RunContext}};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct GitHubProvider {
///     // Fields for authentication, etc.
///     token: String,
/// }
///
/// #[async_trait]
/// impl PullRequestProvider for GitHubProvider {
///     async fn list_labels(
///         &self,
///         context: &RunContext,
///         pr_number: u64,
///     ) -> Result<Vec<Label>, Error> {
///         // Implementation to fetch labels from the GitHub API
///         // ...
///         # unimplemented!()
///     }
/// }
/// ```
#[async_trait]
pub trait PullRequestProvider {
    /// Lists all labels on a pull request.
    ///
    /// # Arguments
    ///
    /// * `context` - The repository coordinates and commit of the current run
    /// * `pr_number` - The pull request number
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of labels, in the order the platform
    /// returns them
    async fn list_labels(&self, context: &RunContext, pr_number: u64)
        -> Result<Vec<Label>, Error>;
}
