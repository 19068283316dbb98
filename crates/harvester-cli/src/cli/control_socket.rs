//! Control socket: server (during `harvester serve`) and client (for `harvester notify`).
//! Protocol: one line per command, see `harvester_core::control`.

use anyhow::{Context, Result};
use harvester_core::control::ControlCommand;
use harvester_core::scheduler::RunSummary;
use harvester_core::{Harvester, StoreError};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

/// Start a scheduler loop without waiting for it. A panic inside the loop is
/// still logged.
pub fn trigger_loop(harvester: &Harvester, task_uri: Option<&str>) {
    let handle = harvester.notify_task_created(task_uri);
    tokio::spawn(watch_loop(handle));
}

/// Await a detached loop. False if it panicked or was cancelled; store errors
/// are logged by the loop itself.
pub async fn watch_loop(handle: JoinHandle<Result<RunSummary, StoreError>>) -> bool {
    match handle.await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("scheduler loop did not finish: {}", e);
            false
        }
    }
}

/// Binds `path` and spawns a task that starts a scheduler loop for each
/// notification line. Malformed lines are ignored.
pub fn spawn_control_listener(
    harvester: Harvester,
    path: impl AsRef<Path>,
) -> Result<JoinHandle<()>> {
    let path = path.as_ref().to_path_buf();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create control socket dir {}", dir.display()))?;
    }
    let _ = std::fs::remove_file(&path);
    let listener = UnixListener::bind(&path)
        .with_context(|| format!("bind control socket {}", path.display()))?;

    let handle = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let harvester = harvester.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(stream).lines();
                        while let Ok(Some(line)) = reader.next_line().await {
                            match ControlCommand::parse(&line) {
                                Some(ControlCommand::Notify { task_uri }) => {
                                    trigger_loop(&harvester, task_uri.as_deref());
                                }
                                None => tracing::debug!(line = %line.trim(), "ignored control line"),
                            }
                        }
                    });
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
        }
    });
    Ok(handle)
}

/// Sends one notification line to a serving harvester.
pub async fn send_notify(socket_path: &Path, task_uri: Option<&str>) -> Result<()> {
    if !socket_path.exists() {
        anyhow::bail!("no harvester is serving on {}", socket_path.display());
    }
    let mut stream = UnixStream::connect(socket_path)
        .await
        .with_context(|| format!("connect {}", socket_path.display()))?;
    let cmd = ControlCommand::Notify {
        task_uri: task_uri.map(str::to_string),
    };
    stream.write_all(cmd.to_line().as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}
