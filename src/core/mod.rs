pub mod exclusion;
pub mod naming;
pub mod runner;

pub use crate::domain::model::{ArchiveRequest, ArchiveSummary, BackupReport};
pub use crate::domain::ports::Archiver;
pub use crate::utils::error::Result;
