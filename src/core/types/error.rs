//! Custom error types for peerdump

use std::path::PathBuf;
use thiserror::Error;

use super::ProcessId;

/// Main error type for process discovery and dump capture
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: ProcessId, reason: String },

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Gave up on {what} after {attempts} attempts, buffer kept being too small")]
    GaveUp { what: String, attempts: usize },

    #[error("{operation} failed: {message} (os error {code})")]
    SystemCall {
        operation: String,
        code: u32,
        message: String,
    },

    #[error("No other process found")]
    NoPeerProcess,

    #[error("Can't create dump file in {dir}, ran out of filenames after {attempts} attempts")]
    FilenamesExhausted { dir: PathBuf, attempts: usize },

    #[error("Nowhere to write the dump file")]
    NowhereToWrite,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for dump operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an access denied error for a process
    pub fn access_denied(pid: ProcessId, reason: impl Into<String>) -> Self {
        MemoryError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        MemoryError::BufferTooSmall { expected, actual }
    }

    /// Creates an error for a failed OS call, keeping the code and message verbatim
    pub fn system_call(operation: impl Into<String>, code: u32, message: impl Into<String>) -> Self {
        MemoryError::SystemCall {
            operation: operation.into(),
            code,
            message: message.into(),
        }
    }

    /// Whether this is the insufficient-buffer indicator of a sized query
    pub fn is_insufficient_buffer(&self) -> bool {
        matches!(self, MemoryError::BufferTooSmall { .. })
    }

    /// Whether this is an access denied failure
    pub fn is_access_denied(&self) -> bool {
        matches!(self, MemoryError::AccessDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::access_denied(1234, "SeDebugPrivilege required");
        assert_eq!(
            err.to_string(),
            "Access denied to process 1234: SeDebugPrivilege required"
        );

        let err = MemoryError::system_call("MiniDumpWriteDump", 8, "Not enough memory");
        assert_eq!(
            err.to_string(),
            "MiniDumpWriteDump failed: Not enough memory (os error 8)"
        );
    }

    #[test]
    fn test_all_error_variants() {
        let errors: Vec<(MemoryError, &str)> = vec![
            (
                MemoryError::BufferTooSmall {
                    expected: 100,
                    actual: 50,
                },
                "Buffer too small: expected 100, got 50",
            ),
            (
                MemoryError::GaveUp {
                    what: "process ids".to_string(),
                    attempts: 10,
                },
                "Gave up on process ids after 10 attempts, buffer kept being too small",
            ),
            (MemoryError::NoPeerProcess, "No other process found"),
            (
                MemoryError::FilenamesExhausted {
                    dir: PathBuf::from("dumps"),
                    attempts: 100,
                },
                "Can't create dump file in dumps, ran out of filenames after 100 attempts",
            ),
            (MemoryError::NowhereToWrite, "Nowhere to write the dump file"),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_helper_methods() {
        let err = MemoryError::access_denied(42, "test reason");
        assert!(err.is_access_denied());
        match err {
            MemoryError::AccessDenied { pid, reason } => {
                assert_eq!(pid, 42);
                assert_eq!(reason, "test reason");
            }
            _ => panic!("Wrong error type"),
        }

        let err = MemoryError::buffer_too_small(256, 128);
        assert!(err.is_insufficient_buffer());
        assert!(!err.is_access_denied());

        let err = MemoryError::system_call("OpenProcess", 87, "The parameter is incorrect.");
        match err {
            MemoryError::SystemCall {
                operation,
                code,
                message,
            } => {
                assert_eq!(operation, "OpenProcess");
                assert_eq!(code, 87);
                assert_eq!(message, "The parameter is incorrect.");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_from_implementations() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "test");
        let err: MemoryError = io_err.into();
        assert!(matches!(err, MemoryError::IoError(_)));
    }
}
