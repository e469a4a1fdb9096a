//! Process exit codes.

/// Exit codes for the application.
///
/// - 0: Normal exit (user quit)
/// - 1: General error (failed startup, terminal I/O error)
/// - 130: Interrupted by a shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
