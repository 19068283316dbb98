//! CLI command handlers. Each command is in its own file.

mod notify;
mod recover;
mod run;
mod serve;
mod status;

pub use notify::run_notify;
pub use recover::run_recover;
pub use run::run_once;
pub use serve::run_serve;
pub use status::run_status;
