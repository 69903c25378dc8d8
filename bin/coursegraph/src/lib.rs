//! Coursegraph CLI Library
//!
//! Command implementations and the HTTP server behind the `coursegraph`
//! binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, index, check, schema)
//! - [`server`] - Axum router serving the GraphQL endpoint
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> color_eyre::eyre::Result<()> {
//! use std::path::Path;
//!
//! coursegraph::cmd::serve::run(Path::new("coursegraph.toml"), None, Some(8080)).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod server;

pub use coursegraph_api::{CourseSchema, build_schema};
pub use coursegraph_core::Config;
pub use coursegraph_store::{Catalog, ContentStore};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
