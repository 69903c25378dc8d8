//! Serve command - run the GraphQL server

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use coursegraph_api::build_schema;
use coursegraph_store::{Catalog, ContentStore};
use tokio::net::TcpListener;

use super::load_config;
use crate::server::{GRAPHQL_PATH, create_router};

/// Run the serve command.
///
/// Builds the content index, then serves the API until interrupted.
/// `port` wins over both the config file and `PORT`.
pub async fn run(config_path: &Path, root: Option<&Path>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(config_path, root)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!(?config_path, port = config.server.port, "Starting server");

    let store = ContentStore::open(&config)
        .await
        .wrap_err("Failed to build the content index")?;
    let schema = build_schema(Catalog::new(Arc::new(store)));
    let app = create_router(schema, config.server.graphiql);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  GraphQL server running at http://{addr}{GRAPHQL_PATH}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_interrupt(tokio::signal::ctrl_c()).await;
}

/// Resolve when `signal` fires. If the listener cannot be installed the
/// server keeps running instead of shutting down at once.
async fn wait_for_interrupt(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for shutdown signal, running until killed");
        std::future::pending::<()>().await;
    }
}
