use crate::domain::model::{ArchiveRequest, ArchiveSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Archiver: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Fail with [`crate::BackupError::MissingDependency`] when the backend
    /// cannot run on this machine. Must not touch the filesystem.
    async fn ensure_available(&self) -> Result<()>;

    async fn archive(&self, request: &ArchiveRequest) -> Result<ArchiveSummary>;
}
