//! `harvester recover` – fail tasks left busy by a crashed process.

use anyhow::{Context, Result};
use harvester_core::Harvester;

pub async fn run_recover(harvester: Harvester) -> Result<()> {
    let recovered = tokio::task::spawn_blocking(move || harvester.startup_recovery())
        .await
        .context("recovery join")??;
    println!("Marked {recovered} busy task(s) as failed");
    Ok(())
}
