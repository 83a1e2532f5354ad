use async_trait::async_trait;
use base64::Engine;
use octocrab::Octocrab;
use tracing::{error, instrument};

use crate::{
    errors::Error,
    models::{Label, RunContext},
    ConfigFetcher, PullRequestProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// The token is the bearer credential handed to the run by the CI
/// environment; every API call the gate makes goes through the resulting
/// client.
///
/// # Arguments
///
/// * `token` - The personal access token to authenticate with.
///
/// # Returns
///
/// A `Result` containing the authenticated `Octocrab` client, or an
/// `Error` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|_| Error::ApiError())
}

/// Decodes file content as returned by the repository contents API.
///
/// The API returns base64 with embedded newlines; those are stripped
/// before decoding. The decoded bytes must be valid UTF-8.
pub fn decode_base64_content(content: &str) -> Result<String, Error> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(content.replace('\n', ""))
        .map_err(|_| Error::InvalidResponse)?;
    String::from_utf8(decoded).map_err(|_| Error::InvalidResponse)
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = *source;
            error!(
                error_message = err.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}

/// GitHub implementation of the platform traits.
///
/// Wraps an authenticated `Octocrab` client; the client is the only
/// object reused across calls and is never mutated.
#[derive(Debug, Default)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    /// Fetch the content of a file from the repository at the given path
    /// and the commit the run was triggered for.
    /// Returns Ok(Some(content)) if found, Ok(None) if not found, or Err on error.
    pub async fn fetch_file_content(
        &self,
        context: &RunContext,
        path: &str,
    ) -> Result<Option<String>, Error> {
        let content_result = self
            .client
            .repos(&context.repo_owner, &context.repo_name)
            .get_content()
            .path(path)
            .r#ref(&context.sha)
            .send()
            .await;

        match content_result {
            Ok(response) => {
                if let Some(file) = response.items.into_iter().next() {
                    if let Some(content) = file.content {
                        Ok(Some(decode_base64_content(&content)?))
                    } else {
                        Ok(None)
                    }
                } else {
                    Ok(None)
                }
            }
            Err(e) => {
                // If 404, treat as not found
                if e.to_string().contains("404") {
                    Ok(None)
                } else {
                    Err(Error::ApiError())
                }
            }
        }
    }

    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigFetcher for GitHubProvider {
    #[instrument]
    async fn fetch_config(
        &self,
        context: &RunContext,
        path: &str,
    ) -> Result<Option<String>, Error> {
        self.fetch_file_content(context, path).await
    }
}

#[async_trait]
impl PullRequestProvider for GitHubProvider {
    #[instrument]
    async fn list_labels(
        &self,
        context: &RunContext,
        pr_number: u64,
    ) -> Result<Vec<Label>, Error> {
        let mut current_page = match self
            .client
            .issues(&context.repo_owner, &context.repo_name)
            .list_labels_for_issue(pr_number)
            .send()
            .await
        {
            Ok(p) => p,
            Err(e) => {
                log_octocrab_error("Failed to list all labels for pull request", e);
                return Err(Error::InvalidResponse);
            }
        };

        let mut labels = current_page.take_items();
        while let Ok(Some(mut new_page)) = self.client.get_page(&current_page.next).await {
            labels.extend(new_page.take_items());

            current_page = new_page;
        }

        let result = labels.into_iter().map(|l| Label { name: l.name }).collect();

        Ok(result)
    }
}
