use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelGateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Git provider error: {0}")]
    GitProviderError(String),

    #[error("The allow-list is not a sequence of strings: {0}")]
    InvalidAllowList(String),
}
