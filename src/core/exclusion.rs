use std::ffi::OsStr;
use std::path::{Component, Path};

/// Directory left out of every backup.
pub const EXCLUDED_DIR: &str = "venv";

/// Excludes one directory directly under the source root, together with
/// everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludeRule {
    dir_name: &'static str,
}

impl ExcludeRule {
    pub const fn new(dir_name: &'static str) -> Self {
        Self { dir_name }
    }

    pub fn dir_name(&self) -> &str {
        self.dir_name
    }

    /// `relative` is a path relative to the source root.
    pub fn matches(&self, relative: &Path) -> bool {
        matches!(
            relative.components().next(),
            Some(Component::Normal(first)) if first == OsStr::new(self.dir_name)
        )
    }

    /// Pattern in the form understood by `zip -x`.
    pub fn zip_pattern(&self, source_dir: &Path) -> String {
        format!("{}/{}/*", source_dir.display(), self.dir_name)
    }
}

impl Default for ExcludeRule {
    fn default() -> Self {
        Self::new(EXCLUDED_DIR)
    }
}
