//! CLI for the PDF resolution harvester.

mod commands;
mod control_socket;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harvester_core::config::{self, HarvesterConfig};
use harvester_core::Harvester;
use std::path::PathBuf;

use commands::{run_notify, run_once, run_recover, run_serve, run_status};

/// Top-level CLI for the harvester.
#[derive(Debug, Parser)]
#[command(name = "harvester")]
#[command(about = "Harvest PDF resolution links into a SPARQL graph store", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/harvester/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Recover orphaned tasks, process open ones, then wait for notifications.
    Serve {
        /// Control socket path (default: XDG state dir).
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
        /// Do not wait for the store to answer before starting.
        #[arg(long)]
        no_wait: bool,
    },

    /// Process open tasks once and exit.
    Run,

    /// Mark every busy harvesting task as failed (only when no loop is running).
    Recover,

    /// Tell a running `serve` that a task was created.
    Notify {
        /// URI of the new task (optional; every open task is picked up).
        task_uri: Option<String>,
        /// Control socket path (default: XDG state dir).
        #[arg(long, value_name = "PATH")]
        socket: Option<PathBuf>,
    },

    /// Show harvesting tasks and their status.
    Status,
}

fn load_config(path: Option<&PathBuf>) -> Result<HarvesterConfig> {
    match path {
        Some(path) => {
            let mut cfg = config::load_from(path)?;
            cfg.apply_env_overrides();
            Ok(cfg)
        }
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        let harvester = Harvester::from_config(cfg);

        match cli.command {
            CliCommand::Serve { socket, no_wait } => run_serve(harvester, socket, !no_wait).await?,
            CliCommand::Run => run_once(harvester).await?,
            CliCommand::Recover => run_recover(harvester).await?,
            CliCommand::Notify { task_uri, socket } => {
                run_notify(task_uri.as_deref(), socket).await?
            }
            CliCommand::Status => run_status(harvester).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
