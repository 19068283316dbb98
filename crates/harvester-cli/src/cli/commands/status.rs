//! `harvester status` – show harvesting tasks.

use anyhow::{Context, Result};
use harvester_core::Harvester;

pub async fn run_status(harvester: Harvester) -> Result<()> {
    let tasks = tokio::task::spawn_blocking(move || harvester.machine().list_tasks())
        .await
        .context("status query join")??;
    if tasks.is_empty() {
        println!("No harvesting tasks in store.");
    } else {
        println!("{:<10} {:<8} {}", "STATUS", "RESULTS", "TASK");
        for t in tasks {
            let status = t.status.map(|s| s.as_str()).unwrap_or("other");
            println!("{:<10} {:<8} {}", status, t.result_containers, t.uri);
        }
    }
    Ok(())
}
