use crate::core::exclusion::ExcludeRule;
use std::path::PathBuf;
use std::time::Duration;

/// 單次封存工作的輸入
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub source_dir: PathBuf,
    pub archive_path: PathBuf,
    pub exclude: ExcludeRule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Directory entries written, when the archiver can tell.
    pub directories: Option<usize>,
    /// File entries written, when the archiver can tell.
    pub files: Option<usize>,
    /// Uncompressed bytes read from the source tree, when known.
    pub source_bytes: Option<u64>,
    pub archive_bytes: u64,
}

#[derive(Debug, Clone)]
pub struct BackupReport {
    pub archive_path: PathBuf,
    pub summary: ArchiveSummary,
    pub elapsed: Duration,
}
