use crate::config::paths::BackupPaths;
use crate::core::exclusion::ExcludeRule;
use crate::core::naming::archive_file_name;
use crate::domain::model::{ArchiveRequest, BackupReport};
use crate::domain::ports::Archiver;
use crate::utils::error::{BackupError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub struct BackupRunner<A: Archiver> {
    paths: BackupPaths,
    archiver: A,
    exclude: ExcludeRule,
}

impl<A: Archiver> BackupRunner<A> {
    pub fn new(paths: BackupPaths, archiver: A) -> Self {
        Self {
            paths,
            archiver,
            exclude: ExcludeRule::default(),
        }
    }

    pub async fn run(&self) -> Result<BackupReport> {
        self.run_at(Local::now()).await
    }

    /// 以指定時間執行備份，封存檔名由 `now` 決定
    pub async fn run_at(&self, now: DateTime<Local>) -> Result<BackupReport> {
        let started = Instant::now();
        self.paths.validate()?;

        let backup_dir = self.paths.backup_dir();
        ensure_backup_dir(backup_dir)?;

        let archive_path = backup_dir.join(archive_file_name(&now));
        tracing::info!("📦 Backing up {} -> {}", self.paths.source_dir().display(), archive_path.display());

        // 先確認封存工具可用，避免寫入任何檔案
        self.archiver.ensure_available().await?;
        tracing::debug!("Using {} archiver", self.archiver.name());

        if archive_path.exists() {
            tracing::warn!("⚠️ Overwriting existing archive {}", archive_path.display());
        }

        let request = ArchiveRequest {
            source_dir: self.paths.source_dir().to_path_buf(),
            archive_path: archive_path.clone(),
            exclude: self.exclude,
        };
        let summary = self.archiver.archive(&request).await?;

        let elapsed = started.elapsed();
        tracing::info!(
            "✅ Archive written ({} bytes) in {:?}",
            summary.archive_bytes,
            elapsed
        );
        if let (Some(files), Some(dirs)) = (summary.files, summary.directories) {
            tracing::debug!("Archived {} files in {} directories", files, dirs);
        }

        Ok(BackupReport {
            archive_path,
            summary,
            elapsed,
        })
    }
}

/// Idempotent: an existing directory is not an error.
pub fn ensure_backup_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BackupError::CreateBackupDir {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Backup directory ready: {}", path.display());
    Ok(())
}
