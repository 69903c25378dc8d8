//! Server configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

/// Prefix for layered environment overrides (`COURSEGRAPH__SERVER__HOST`).
pub const ENV_PREFIX: &str = "COURSEGRAPH";

/// Main configuration structure for coursegraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Content location.
    #[serde(default)]
    pub content: ContentConfig,

    /// Content index settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the GraphiQL explorer on `GET /graphql`.
    #[serde(default = "default_true")]
    pub graphiql: bool,
}

/// Content location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory that contains the `content/` tree. Index file paths are
    /// relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

/// Content index configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// External command that prints the index as JSON. When unset the
    /// content tree is scanned in-process.
    #[serde(default)]
    pub provider: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphiql: true,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file layered with environment
    /// variables, then apply the `PORT` override.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        Self::from_layers(path, std::env::var(PORT_ENV).ok().as_deref())
    }

    fn from_layers(path: Option<&Path>, port: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.apply_port_override(port)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the port with the value of the `PORT` variable, if any.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        self.server.port = value.parse().map_err(|e| {
            CoreError::config_with_source(format!("{PORT_ENV} is not a valid port: {value}"), e)
        })?;
        Ok(())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(CoreError::config("server.host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(CoreError::config("server.port cannot be 0"));
        }

        if let Some(provider) = &self.index.provider
            && provider.trim().is_empty()
        {
            return Err(CoreError::config("index.provider cannot be blank"));
        }

        if !self.content_dir().exists() {
            tracing::warn!(
                dir = %self.content_dir().display(),
                "content directory does not exist yet"
            );
        }

        Ok(())
    }

    /// Directory holding the course directories.
    pub fn content_dir(&self) -> PathBuf {
        self.content.root.join("content")
    }

    /// `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
