//! Coursegraph CLI
//!
//! GraphQL server over a file-backed course, unit and page content tree.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for coursegraph.
#[derive(Parser)]
#[command(
    name = "coursegraph",
    version,
    about = "GraphQL API over course content files"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "coursegraph.toml", global = true)]
    config: PathBuf,

    /// Directory containing `content/`, overrides the config
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the GraphQL API
    Serve {
        /// Port to listen on, overrides config and PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the content index as JSON
    Index,
    /// Validate course, unit and page references
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the GraphQL schema
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    coursegraph::init_tracing(cli.verbose);

    let root = cli.root.as_deref();
    match cli.command {
        Commands::Serve { port } => {
            coursegraph::cmd::serve::run(&cli.config, root, port).await?;
        }
        Commands::Index => {
            coursegraph::cmd::index::run(&cli.config, root)?;
        }
        Commands::Check { strict } => {
            coursegraph::cmd::check::run(&cli.config, root, strict).await?;
        }
        Commands::Schema => {
            coursegraph::cmd::schema::run()?;
        }
    }

    Ok(())
}
