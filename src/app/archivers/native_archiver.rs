use crate::domain::model::{ArchiveRequest, ArchiveSummary};
use crate::domain::ports::Archiver;
use crate::utils::error::{BackupError, Result};
use chrono::{Datelike, Local, Timelike};
use std::fs::{self, File, Metadata};
use std::io::{Read, Write};
use std::path::Path;
use std::time::SystemTime;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

const COPY_BUFFER_SIZE: usize = 64 * 1024;
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Writes the archive in-process with the `zip` crate.
#[derive(Debug, Clone)]
pub struct NativeArchiver {
    compression: CompressionMethod,
}

impl NativeArchiver {
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl Default for NativeArchiver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Archiver for NativeArchiver {
    fn name(&self) -> &str {
        "native"
    }

    async fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    async fn archive(&self, request: &ArchiveRequest) -> Result<ArchiveSummary> {
        // 單執行緒執行：直接在目前的 task 中同步寫入
        write_archive(request, self.compression)
    }
}

struct ArchiveWalk<'a> {
    request: &'a ArchiveRequest,
    root_name: String,
    compression: CompressionMethod,
    zip: ZipWriter<File>,
    summary: ArchiveSummary,
    buffer: Vec<u8>,
}

fn write_archive(request: &ArchiveRequest, compression: CompressionMethod) -> Result<ArchiveSummary> {
    let source = &request.source_dir;
    let metadata = fs::metadata(source).map_err(|e| BackupError::SourceUnavailable {
        path: source.clone(),
        reason: e.to_string(),
    })?;
    if !metadata.is_dir() {
        return Err(BackupError::SourceUnavailable {
            path: source.clone(),
            reason: "not a directory".to_string(),
        });
    }

    let root_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".to_string());

    let file = File::create(&request.archive_path)
        .map_err(|e| BackupError::from_archive_write(&request.archive_path, e))?;

    let mut walk = ArchiveWalk {
        request,
        root_name,
        compression,
        zip: ZipWriter::new(file),
        summary: ArchiveSummary {
            directories: Some(0),
            files: Some(0),
            source_bytes: Some(0),
            archive_bytes: 0,
        },
        buffer: vec![0; COPY_BUFFER_SIZE],
    };

    let root_entry = walk.root_name.clone();
    walk.add_directory(root_entry, &metadata)?;
    walk.visit(source)?;

    let ArchiveWalk {
        zip, mut summary, ..
    } = walk;
    let file = zip
        .finish()
        .map_err(|e| BackupError::from_zip_write(&request.archive_path, e))?;
    file.sync_all()
        .map_err(|e| BackupError::from_archive_write(&request.archive_path, e))?;

    summary.archive_bytes = fs::metadata(&request.archive_path)?.len();
    Ok(summary)
}

impl ArchiveWalk<'_> {
    fn visit(&mut self, dir: &Path) -> Result<()> {
        let mut entries = fs::read_dir(dir)
            .and_then(|iter| iter.collect::<std::io::Result<Vec<_>>>())
            .map_err(|source| BackupError::SourceRead {
                path: dir.to_path_buf(),
                source,
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let relative = match path.strip_prefix(&self.request.source_dir) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => continue,
            };

            if self.request.exclude.matches(&relative) {
                tracing::debug!("Excluding {}", path.display());
                continue;
            }
            if path == self.request.archive_path {
                tracing::debug!("Skipping the archive being written: {}", path.display());
                continue;
            }

            // zip 項目名稱必須是 UTF-8，無法表示的名稱整個略過
            let Some(name) = self.entry_name(&relative) else {
                tracing::warn!("⚠️ Skipping {}: file name is not valid UTF-8", path.display());
                continue;
            };

            let file_type = entry.file_type().map_err(|source| BackupError::SourceRead {
                path: path.clone(),
                source,
            })?;

            if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(target) if target.is_file() => self.add_file(&path, name, &target)?,
                    Ok(_) => tracing::warn!("⚠️ Skipping symlinked directory {}", path.display()),
                    Err(e) => tracing::warn!("⚠️ Skipping dangling symlink {}: {}", path.display(), e),
                }
            } else if file_type.is_dir() {
                let metadata = read_metadata(&path)?;
                self.add_directory(name, &metadata)?;
                self.visit(&path)?;
            } else if file_type.is_file() {
                let metadata = read_metadata(&path)?;
                self.add_file(&path, name, &metadata)?;
            } else {
                tracing::warn!("⚠️ Skipping special file {}", path.display());
            }
        }

        Ok(())
    }

    fn add_directory(&mut self, name: String, metadata: &Metadata) -> Result<()> {
        let options = self.entry_options(metadata);
        self.zip
            .add_directory(name, options)
            .map_err(|e| BackupError::from_zip_write(&self.request.archive_path, e))?;
        bump(&mut self.summary.directories, 1);
        Ok(())
    }

    fn add_file(&mut self, path: &Path, name: String, metadata: &Metadata) -> Result<()> {
        let mut source = File::open(path).map_err(|source| BackupError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        let options = self
            .entry_options(metadata)
            .compression_method(self.compression)
            .large_file(metadata.len() >= ZIP64_THRESHOLD);
        self.zip
            .start_file(name, options)
            .map_err(|e| BackupError::from_zip_write(&self.request.archive_path, e))?;

        // 分開處理讀取與寫入錯誤，才能區分來源與目的地的問題
        let mut copied = 0u64;
        loop {
            let read = source
                .read(&mut self.buffer)
                .map_err(|source| BackupError::SourceRead {
                    path: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            self.zip
                .write_all(&self.buffer[..read])
                .map_err(|e| BackupError::from_archive_write(&self.request.archive_path, e))?;
            copied += read as u64;
        }

        bump(&mut self.summary.files, 1);
        if let Some(total) = self.summary.source_bytes.as_mut() {
            *total += copied;
        }
        Ok(())
    }

    fn entry_name(&self, relative: &Path) -> Option<String> {
        let mut name = self.root_name.clone();
        for component in relative.components() {
            name.push('/');
            name.push_str(component.as_os_str().to_str()?);
        }
        Some(name)
    }

    fn entry_options(&self, metadata: &Metadata) -> SimpleFileOptions {
        let mut options = SimpleFileOptions::default();
        if let Some(modified) = metadata.modified().ok().and_then(to_zip_datetime) {
            options = options.last_modified_time(modified);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(metadata.permissions().mode() & 0o7777);
        }
        options
    }
}

fn read_metadata(path: &Path) -> Result<Metadata> {
    fs::metadata(path).map_err(|source| BackupError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

fn bump(counter: &mut Option<usize>, by: usize) {
    if let Some(count) = counter.as_mut() {
        *count += by;
    }
}

/// zip 時間戳僅支援 1980 至 2107 年，超出範圍時回傳 None
fn to_zip_datetime(time: SystemTime) -> Option<zip::DateTime> {
    let local: chrono::DateTime<Local> = time.into();
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}
