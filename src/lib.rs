pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::archivers::{CommandArchiver, NativeArchiver};
pub use crate::config::{paths::BackupPaths, ArchiverKind, CliConfig};
pub use crate::core::runner::BackupRunner;
pub use crate::utils::error::{BackupError, Result};
