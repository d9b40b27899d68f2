//! Fixed backup locations, resolved against the user's home directory.
//!
//! Both directories are constants relative to `$HOME`; changing them means
//! editing this file.

use std::path::{Path, PathBuf};

use crate::utils::error::{BackupError, Result};
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};

/// Source tree, relative to the home directory.
pub const SOURCE_SUBDIR: [&str; 2] = ["projects", "house"];

/// Archive destination, relative to the home directory.
pub const BACKUP_SUBDIR: [&str; 2] = ["projects", "backup"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPaths {
    source_dir: PathBuf,
    backup_dir: PathBuf,
}

impl BackupPaths {
    /// Resolve both directories from the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::HomeDirUnavailable`] if no home directory can be
    /// determined.
    pub fn resolve() -> Result<Self> {
        let base_dirs = directories::BaseDirs::new().ok_or(BackupError::HomeDirUnavailable)?;
        Ok(Self::from_home(base_dirs.home_dir()))
    }

    /// Derive both directories from an explicit home directory (useful for testing)
    pub fn from_home(home: &Path) -> Self {
        Self {
            source_dir: SOURCE_SUBDIR.iter().fold(home.to_path_buf(), |p, c| p.join(c)),
            backup_dir: BACKUP_SUBDIR.iter().fold(home.to_path_buf(), |p, c| p.join(c)),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}

impl Validate for BackupPaths {
    fn validate(&self) -> Result<()> {
        validate_path("source_dir", &self.source_dir)?;
        validate_path("backup_dir", &self.backup_dir)?;
        validate_distinct_paths("backup_dir", &self.backup_dir, &self.source_dir)
    }
}
