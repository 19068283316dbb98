//! Control socket protocol for task-created notifications.
//!
//! One command per line:
//! - `delta` or `notify`: scan for open tasks.
//! - `notify <task-uri>`: same, logging the task that triggered it.
//! Anything else is ignored by the listener.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Notify { task_uri: Option<String> },
}

impl ControlCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match verb {
            "delta" if rest.is_empty() => Some(ControlCommand::Notify { task_uri: None }),
            "notify" => Some(ControlCommand::Notify {
                task_uri: (!rest.is_empty()).then(|| rest.to_string()),
            }),
            _ => None,
        }
    }

    /// Wire form, newline terminated.
    pub fn to_line(&self) -> String {
        match self {
            ControlCommand::Notify { task_uri: Some(uri) } => format!("notify {uri}\n"),
            ControlCommand::Notify { task_uri: None } => "notify\n".to_string(),
        }
    }
}

/// Default path for the control socket (XDG state dir).
pub fn default_control_socket_path() -> std::io::Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("harvester")?.get_state_home();
    Ok(dir.join("control.sock"))
}
