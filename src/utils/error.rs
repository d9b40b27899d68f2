use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Invalid {field} '{}': {reason}", path.display())]
    InvalidPath {
        field: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to create backup directory {}: {source}", path.display())]
    CreateBackupDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required archiving tool '{tool}' was not found on PATH")]
    MissingDependency { tool: String },

    #[error("'{tool}' exited with {}", exit_code_label(*code))]
    ArchiveCommandFailed { tool: String, code: Option<i32> },

    #[error("Source directory {} is unavailable: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Permission denied writing archive {}", path.display())]
    ArchivePermissionDenied { path: PathBuf },

    #[error("No space left on device while writing archive {}", path.display())]
    StorageFull { path: PathBuf },

    #[error("Failed to write archive {}: {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BackupError>;

fn exit_code_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl BackupError {
    /// 將寫入封存檔時的 I/O 錯誤依種類分類
    pub fn from_archive_write(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => BackupError::ArchivePermissionDenied { path },
            std::io::ErrorKind::StorageFull => BackupError::StorageFull { path },
            _ => BackupError::ArchiveWrite { path, source: err },
        }
    }

    /// 將 zip 寫入錯誤轉換為封存檔錯誤，底層 I/O 錯誤保留分類
    pub fn from_zip_write(path: impl Into<PathBuf>, err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::from_archive_write(path, io),
            other => BackupError::ZipError(other),
        }
    }

    /// Whether the failure happened while producing the archive itself.
    pub fn is_archive_failure(&self) -> bool {
        matches!(
            self,
            BackupError::ArchiveCommandFailed { .. }
                | BackupError::SourceUnavailable { .. }
                | BackupError::SourceRead { .. }
                | BackupError::ArchivePermissionDenied { .. }
                | BackupError::StorageFull { .. }
                | BackupError::ArchiveWrite { .. }
                | BackupError::ZipError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BackupError::MissingDependency { tool } => format!(
                "Error: '{}' is not installed. It is required to create the backup archive.",
                tool
            ),
            BackupError::CreateBackupDir { path, .. } => {
                format!("Could not create backup directory {}", path.display())
            }
            err if err.is_archive_failure() => format!("Failed to create backup archive: {}", err),
            err => err.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BackupError::HomeDirUnavailable => {
                "Make sure the HOME environment variable points to your home directory".to_string()
            }
            BackupError::InvalidPath { .. } => {
                "Check the source and backup directory constants".to_string()
            }
            BackupError::CreateBackupDir { .. } => {
                "Check that the parent directory exists and is writable".to_string()
            }
            BackupError::MissingDependency { tool } => format!(
                "Install it with your package manager (e.g. 'sudo apt install {}') or rerun with --archiver native",
                tool
            ),
            BackupError::SourceUnavailable { .. } => {
                "Make sure the source directory exists and you have permissions to read it; also verify there is enough disk space"
                    .to_string()
            }
            BackupError::ArchivePermissionDenied { .. } => {
                "Check write permissions on the backup directory; also verify there is enough disk space"
                    .to_string()
            }
            BackupError::StorageFull { .. } => {
                "Free up disk space on the backup volume; also check permissions on the backup directory"
                    .to_string()
            }
            _ => "Check permissions on the source and backup directories and available disk space"
                .to_string(),
        }
    }
}
