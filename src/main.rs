use clap::Parser;
use house_backup::core::BackupReport;
use house_backup::utils::logger;
use house_backup::{
    ArchiverKind, BackupError, BackupPaths, BackupRunner, CliConfig, CommandArchiver,
    NativeArchiver,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting house-backup");
    tracing::debug!("CLI config: {:?}", config);

    let paths = match BackupPaths::resolve() {
        Ok(paths) => paths,
        Err(e) => exit_with_error(&e),
    };

    let result = match config.archiver {
        ArchiverKind::Native => BackupRunner::new(paths, NativeArchiver::new()).run().await,
        ArchiverKind::ZipCommand => BackupRunner::new(paths, CommandArchiver::new()).run().await,
    };

    match result {
        Ok(report) => print_success(&report),
        Err(e) => exit_with_error(&e),
    }
}

fn print_success(report: &BackupReport) {
    tracing::info!("✅ Backup completed in {:?}", report.elapsed);
    println!(
        "✅ Backup created successfully: {}",
        report.archive_path.display()
    );
}

fn exit_with_error(e: &BackupError) -> ! {
    tracing::error!("❌ Backup failed: {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(1);
}
