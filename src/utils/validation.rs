use crate::utils::error::{BackupError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(BackupError::InvalidPath {
            field: field_name.to_string(),
            path: path.to_path_buf(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if !path.is_absolute() {
        return Err(BackupError::InvalidPath {
            field: field_name.to_string(),
            path: path.to_path_buf(),
            reason: "Path must be absolute".to_string(),
        });
    }

    Ok(())
}

pub fn validate_distinct_paths(field_name: &str, path: &Path, other: &Path) -> Result<()> {
    if path == other {
        return Err(BackupError::InvalidPath {
            field: field_name.to_string(),
            path: path.to_path_buf(),
            reason: format!("Path must differ from {}", other.display()),
        });
    }
    Ok(())
}
