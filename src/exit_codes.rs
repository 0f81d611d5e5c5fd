//! Process exit codes for the Docmost CLI.
//!
//! Scripts can rely on three outcomes: success, a failed operation, and an
//! invalid command line. Argument parsing errors are reported by clap with the
//! same usage code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocmostExitCode {
    /// Success (0) - Command completed successfully, or was cancelled by the user
    Success = 0,

    /// Failure (1) - Configuration, authentication, API, connection or data error
    Failure = 1,

    /// Command line usage error (2) - Missing or invalid arguments
    UsageError = 2,
}

impl DocmostExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<DocmostExitCode> for i32 {
    fn from(code: DocmostExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(DocmostExitCode::Success.code(), 0);
        assert_eq!(DocmostExitCode::Failure.code(), 1);
        assert_eq!(i32::from(DocmostExitCode::UsageError), 2);
    }
}
