pub mod paths;

use clap::{Parser, ValueEnum};

/// 封存實作的選擇
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArchiverKind {
    /// Write the zip archive in-process
    Native,
    /// Shell out to the `zip` executable found on PATH
    ZipCommand,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "house-backup", version)]
#[command(about = "Back up ~/projects/house into a timestamped zip under ~/projects/backup")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value_t = ArchiverKind::Native, help = "Archiving backend")]
    pub archiver: ArchiverKind,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
