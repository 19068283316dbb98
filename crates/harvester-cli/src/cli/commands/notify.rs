//! `harvester notify [uri]` – wake a running `harvester serve`.

use anyhow::Result;
use harvester_core::control::default_control_socket_path;
use std::path::PathBuf;

use crate::cli::control_socket;

pub async fn run_notify(task_uri: Option<&str>, socket: Option<PathBuf>) -> Result<()> {
    let path = match socket {
        Some(p) => p,
        None => default_control_socket_path()?,
    };
    control_socket::send_notify(&path, task_uri).await?;
    match task_uri {
        Some(uri) => println!("Notified harvester of {uri}"),
        None => println!("Notified harvester"),
    }
    Ok(())
}
