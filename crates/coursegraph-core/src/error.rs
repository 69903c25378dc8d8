//! Errors raised while reading content and configuration.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid or unreadable configuration.
    #[error("invalid configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A content file whose `---` header is not valid YAML for its kind.
    #[error("bad front-matter in {}: {message}", path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("cannot derive an id: {0}")]
    MissingId(String),

    /// An id that cannot be used as a single file or directory name.
    #[error("invalid id {0:?}: ids must not be blank or contain `/`, `\\` or `..`")]
    InvalidId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Layered file and environment settings failed to merge.
    #[error("settings: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_id(message: impl Into<String>) -> Self {
        Self::MissingId(message.into())
    }

    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }
}
