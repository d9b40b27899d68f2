pub mod command_archiver;
pub mod native_archiver;

pub use command_archiver::CommandArchiver;
pub use native_archiver::NativeArchiver;
