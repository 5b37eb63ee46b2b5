//! Error types for condextract

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// condextract errors
///
/// A missing statement container is not an error: it is reported as `None`
/// by [`crate::container::StatementContainer::resolve`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_selection(msg: impl Into<String>) -> Self {
        Error::InvalidSelection(msg.into())
    }
}
