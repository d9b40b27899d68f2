use chrono::{Local, TimeZone};
use house_backup::{BackupError, BackupPaths, BackupRunner, CommandArchiver, NativeArchiver};
use regex::Regex;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tempfile::TempDir;

fn setup_home() -> (TempDir, BackupPaths) {
    let home = TempDir::new().unwrap();
    let paths = BackupPaths::from_home(home.path());

    let source = paths.source_dir();
    fs::create_dir_all(source.join("venv")).unwrap();
    fs::create_dir_all(source.join("modules")).unwrap();
    fs::write(source.join("a.txt"), "energy readings").unwrap();
    fs::write(source.join("venv/b.txt"), "virtualenv file").unwrap();
    fs::write(source.join("modules/power.py"), "print('power')").unwrap();

    (home, paths)
}

fn archive_entries(archive_path: &Path) -> Vec<String> {
    let zip_data = fs::read(archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_entry(archive_path: &Path, name: &str) -> String {
    let zip_data = fs::read(archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[tokio::test]
async fn test_backup_excludes_venv() {
    let (_home, paths) = setup_home();
    let runner = BackupRunner::new(paths, NativeArchiver::new());

    let report = runner.run().await.unwrap();

    let names = archive_entries(&report.archive_path);
    assert!(names.contains(&"house/a.txt".to_string()));
    assert!(names.contains(&"house/modules/power.py".to_string()));
    assert!(!names.iter().any(|n| n.contains("venv/")));
    assert!(!names.iter().any(|n| n.contains("b.txt")));

    assert_eq!(report.summary.files, Some(2));
    assert_eq!(read_entry(&report.archive_path, "house/a.txt"), "energy readings");
}

#[tokio::test]
async fn test_backup_creates_missing_destination() {
    let (_home, paths) = setup_home();
    assert!(!paths.backup_dir().exists());

    let runner = BackupRunner::new(paths.clone(), NativeArchiver::new());
    let report = runner.run().await.unwrap();

    assert!(paths.backup_dir().is_dir());
    assert_eq!(report.archive_path.parent().unwrap(), paths.backup_dir());
    assert!(report.archive_path.is_file());
}

#[tokio::test]
async fn test_archive_name_matches_pattern() {
    let (_home, paths) = setup_home();
    let runner = BackupRunner::new(paths, NativeArchiver::new());

    let report = runner.run().await.unwrap();

    let pattern = Regex::new(r"^backup_\d{8}_\d{4}\.zip$").unwrap();
    let file_name = report.archive_path.file_name().unwrap().to_str().unwrap();
    assert!(pattern.is_match(file_name), "unexpected name {}", file_name);
}

#[tokio::test]
async fn test_same_minute_run_overwrites_archive() {
    let (_home, paths) = setup_home();
    let runner = BackupRunner::new(paths.clone(), NativeArchiver::new());

    let first_run = Local.with_ymd_and_hms(2025, 10, 19, 8, 15, 3).unwrap();
    let second_run = Local.with_ymd_and_hms(2025, 10, 19, 8, 15, 47).unwrap();

    let first = runner.run_at(first_run).await.unwrap();
    fs::write(paths.source_dir().join("a.txt"), "updated readings").unwrap();
    let second = runner.run_at(second_run).await.unwrap();

    assert_eq!(first.archive_path, second.archive_path);
    assert_eq!(
        second.archive_path.file_name().unwrap(),
        "backup_20251019_0815.zip"
    );
    assert_eq!(fs::read_dir(paths.backup_dir()).unwrap().count(), 1);
    assert_eq!(read_entry(&second.archive_path, "house/a.txt"), "updated readings");
}

#[tokio::test]
async fn test_missing_zip_tool_leaves_destination_untouched() {
    let (_home, paths) = setup_home();
    fs::create_dir_all(paths.backup_dir()).unwrap();
    let existing = paths.backup_dir().join("backup_20240101_0000.zip");
    fs::write(&existing, "old archive").unwrap();

    let empty_path = TempDir::new().unwrap();
    let runner = BackupRunner::new(
        paths.clone(),
        CommandArchiver::with_search_path(empty_path.path()),
    );

    let err = runner.run().await.unwrap_err();

    assert!(matches!(err, BackupError::MissingDependency { .. }));
    let entries: Vec<_> = fs::read_dir(paths.backup_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries, vec![existing.clone()]);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "old archive");
}

#[tokio::test]
async fn test_missing_source_fails() {
    let home = TempDir::new().unwrap();
    let paths = BackupPaths::from_home(home.path());
    let runner = BackupRunner::new(paths.clone(), NativeArchiver::new());

    let err = runner.run().await.unwrap_err();

    assert!(matches!(err, BackupError::SourceUnavailable { .. }));
    assert_eq!(fs::read_dir(paths.backup_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unwritable_archive_path_fails_with_hint() {
    let (_home, paths) = setup_home();
    let run_time = Local.with_ymd_and_hms(2025, 10, 19, 9, 0, 0).unwrap();
    // 以同名目錄佔住封存檔路徑，與權限位元無關
    let blocked = paths.backup_dir().join("backup_20251019_0900.zip");
    fs::create_dir_all(&blocked).unwrap();

    let runner = BackupRunner::new(paths.clone(), NativeArchiver::new());
    let err = runner.run_at(run_time).await.unwrap_err();

    assert!(err.is_archive_failure());
    assert!(err
        .user_friendly_message()
        .starts_with("Failed to create backup archive"));
    let suggestion = err.recovery_suggestion().to_lowercase();
    assert!(suggestion.contains("permissions"));
    assert!(suggestion.contains("disk space"));
    assert!(blocked.is_dir());
}

#[cfg(unix)]
#[tokio::test]
async fn test_read_only_destination_reports_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_home, paths) = setup_home();
    fs::create_dir_all(paths.backup_dir()).unwrap();
    fs::set_permissions(paths.backup_dir(), fs::Permissions::from_mode(0o555)).unwrap();

    // root 可忽略權限，此時無法驗證
    let marker = paths.backup_dir().join(".write-check");
    if fs::write(&marker, b"").is_ok() {
        fs::remove_file(&marker).unwrap();
        return;
    }

    let runner = BackupRunner::new(paths.clone(), NativeArchiver::new());
    let err = runner.run().await.unwrap_err();

    fs::set_permissions(paths.backup_dir(), fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(err, BackupError::ArchivePermissionDenied { .. }));
    let suggestion = err.recovery_suggestion().to_lowercase();
    assert!(suggestion.contains("permission"));
    assert!(suggestion.contains("disk space"));
}
