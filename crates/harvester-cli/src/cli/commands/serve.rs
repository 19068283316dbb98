//! `harvester serve` – long-running service: recovery, initial scan, then
//! notifications from the control socket and the optional periodic re-check.

use anyhow::{Context, Result};
use harvester_core::control::default_control_socket_path;
use harvester_core::Harvester;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::control_socket;

pub async fn run_serve(harvester: Harvester, socket: Option<PathBuf>, wait: bool) -> Result<()> {
    if wait {
        let attempts = harvester.config().store_wait_attempts;
        let h = harvester.clone();
        tokio::task::spawn_blocking(move || h.wait_for_store(attempts, Duration::from_secs(1)))
            .await
            .context("store wait join")??;
    }

    // Recovery must finish before any loop can claim a task.
    let h = harvester.clone();
    tokio::task::spawn_blocking(move || h.startup_recovery())
        .await
        .context("recovery join")??;

    control_socket::trigger_loop(&harvester, None);

    let socket_path = match socket {
        Some(p) => p,
        None => default_control_socket_path()?,
    };
    let listener = control_socket::spawn_control_listener(harvester.clone(), &socket_path)?;
    tracing::info!(path = %socket_path.display(), "control socket listening");

    let recheck = harvester.config().recheck_interval_secs.filter(|s| *s > 0).map(|secs| {
        let harvester = harvester.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            // The first tick completes immediately; the initial scan already ran.
            interval.tick().await;
            loop {
                interval.tick().await;
                control_socket::trigger_loop(&harvester, None);
            }
        })
    });

    tokio::signal::ctrl_c().await.context("wait for shutdown signal")?;
    tracing::info!("shutting down");
    listener.abort();
    if let Some(r) = recheck {
        r.abort();
    }
    let _ = std::fs::remove_file(&socket_path);
    Ok(())
}
