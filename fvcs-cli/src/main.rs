//! fvcs - single-file revision tracker
//!
//! History is held in memory for the lifetime of one invocation.

mod demo;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fvcs_core::{LocalFs, Repository, RepositoryConfig};
use session::Session;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fvcs")]
#[command(author = "fvcs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Snapshot, list and restore revisions of a single file", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read commands from stdin; history lasts until the session ends
    Session {
        /// Directory relative file names resolve against
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Commit a file twice, list the log, and revert to the first revision
    Demo {
        #[arg(short, long, default_value = "example.txt")]
        file: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let config = match &cli.config {
        Some(path) => RepositoryConfig::load(path)
            .with_context(|| format!("Failed to load configuration {:?}", path))?,
        None => RepositoryConfig::default(),
    };
    info!("Read policy: {:?}", config.read_policy);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Session { root } => {
            let fs = match root {
                Some(root) => LocalFs::with_root(root),
                None => LocalFs::new(),
            };
            let session = Session::new(Repository::with_config(fs, config));
            let stdin = std::io::stdin();
            session.run(stdin.lock(), &mut out)?;
            info!(
                "Session ended, discarding {} revisions",
                session.repository().len()
            );
        }

        Commands::Demo { file } => {
            let repo = Repository::with_config(LocalFs::new(), config);
            demo::run_demo(&repo, &file, &mut out)?;
        }
    }

    Ok(())
}
