use crate::domain::model::{ArchiveRequest, ArchiveSummary};
use crate::domain::ports::Archiver;
use crate::utils::error::{BackupError, Result};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub const ZIP_TOOL: &str = "zip";

/// Runs the external `zip` executable; only its exit status is used.
#[derive(Debug, Clone)]
pub struct CommandArchiver {
    tool: String,
    search_path: Option<OsString>,
}

impl CommandArchiver {
    /// Look up `zip` on the process `PATH`.
    pub fn new() -> Self {
        Self {
            tool: ZIP_TOOL.to_string(),
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Look up `zip` on an explicit search path (useful for testing)
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            tool: ZIP_TOOL.to_string(),
            search_path: Some(search_path.into()),
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        self.search_path
            .as_deref()
            .and_then(|search_path| find_in_path(&self.tool, search_path))
            .ok_or_else(|| BackupError::MissingDependency {
                tool: self.tool.clone(),
            })
    }
}

impl Default for CommandArchiver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Archiver for CommandArchiver {
    fn name(&self) -> &str {
        &self.tool
    }

    async fn ensure_available(&self) -> Result<()> {
        let program = self.locate()?;
        tracing::debug!("Found {} at {}", self.tool, program.display());
        Ok(())
    }

    async fn archive(&self, request: &ArchiveRequest) -> Result<ArchiveSummary> {
        let program = self.locate()?;
        let exclude = request.exclude.zip_pattern(&request.source_dir);

        tracing::debug!(
            "Running {} -r -q {} {} -x {}",
            program.display(),
            request.archive_path.display(),
            request.source_dir.display(),
            exclude
        );

        // 只保留結束狀態；stderr 留作除錯日誌
        let output = Command::new(&program)
            .arg("-r")
            .arg("-q")
            .arg(&request.archive_path)
            .arg(&request.source_dir)
            .arg("-x")
            .arg(&exclude)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            tracing::debug!("{} stderr: {}", self.tool, stderr.trim());
        }

        if !output.status.success() {
            return Err(BackupError::ArchiveCommandFailed {
                tool: self.tool.clone(),
                code: output.status.code(),
            });
        }

        let archive_bytes = fs::metadata(&request.archive_path)?.len();
        Ok(ArchiveSummary {
            archive_bytes,
            ..Default::default()
        })
    }
}

/// First executable named `program` in the `PATH`-style `search_path`.
pub fn find_in_path(program: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}
