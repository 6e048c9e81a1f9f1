use crate::expiry::Level;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "Warning",
            Status::Critical => "Critical",
            Status::Unknown => "Unknown",
        }
    }
}

impl From<Level> for Status {
    fn from(level: Level) -> Status {
        match level {
            Level::Ok => Status::Ok,
            Level::Warning => Status::Warning,
            Level::Critical => Status::Critical,
        }
    }
}

/// The one line a monitoring scheduler gets to see, plus the exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: Status,
    pub days_remaining: Option<i64>,
    pub message: String,
    pub exit_code: i32,
}

impl CheckResult {
    pub fn expiry(level: Level, days_remaining: i64) -> CheckResult {
        let status = Status::from(level);
        CheckResult {
            status,
            days_remaining: Some(days_remaining),
            message: format!("{} - Expires in {} days", status.label(), days_remaining),
            exit_code: status.exit_code(),
        }
    }

    pub fn unknown<E: fmt::Display>(cause: E) -> CheckResult {
        let status = Status::Unknown;
        CheckResult {
            status,
            days_remaining: None,
            message: format!("{} - {}", status.label(), cause),
            exit_code: status.exit_code(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
