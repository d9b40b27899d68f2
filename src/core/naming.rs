use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Minute precision: two runs in the same minute share a file name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

pub fn timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// `backup_<YYYYMMDD_HHMM>.zip`
pub fn archive_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!("backup_{}.zip", timestamp(now))
}
