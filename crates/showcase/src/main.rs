//! Showcase CLI - builds the web showcase of the engine samples.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Builds the web showcase of the engine sample programs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to showcase.toml config file
    #[arg(short, long, default_value = "showcase.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file, manifest and templates
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Sync repositories, build every sample and assemble the site
    Build {
        /// Sample manifest (defaults to config or "samples.yaml")
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Work directory (defaults to config or "build")
        #[arg(short, long)]
        work_dir: Option<PathBuf>,

        /// Reuse the existing clones as they are
        #[arg(long)]
        skip_sync: bool,
    },

    /// Clone or update the engine and samples repositories
    Sync {
        /// Sample manifest (defaults to config or "samples.yaml")
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Validate the manifest and list the build matrix
    Check {
        /// Sample manifest (defaults to config or "samples.yaml")
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the work directory's site/)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            manifest,
            work_dir,
            skip_sync,
        } => {
            commands::build::run(&cli.config, manifest, work_dir, skip_sync).await?;
        }
        Commands::Sync { manifest } => {
            commands::sync::run(&cli.config, manifest).await?;
        }
        Commands::Check { manifest } => {
            commands::check::run(&cli.config, manifest).await?;
        }
        Commands::Serve { port, dir } => {
            commands::serve::run(&cli.config, port, dir).await?;
        }
    }

    Ok(())
}
