//! Exit status codes for the CLI
//!
//! - 0: Success
//! - 1: Any error (invalid command, parse failure, unreadable input)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    /// Validation violations, parse errors, I/O failures
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Error when any validation violation was reported
    pub fn from_violations(count: usize) -> Self {
        if count == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }
}
