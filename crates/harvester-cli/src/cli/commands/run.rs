//! `harvester run` – process open tasks once.

use anyhow::{Context, Result};
use harvester_core::Harvester;

pub async fn run_once(harvester: Harvester) -> Result<()> {
    let summary = tokio::task::spawn_blocking(move || harvester.process_open_tasks())
        .await
        .context("scheduler loop join")??;
    if summary.total() == 0 {
        println!("No open tasks.");
    } else {
        println!(
            "Processed {} task(s): {} succeeded, {} failed",
            summary.total(),
            summary.succeeded,
            summary.failed
        );
    }
    Ok(())
}
