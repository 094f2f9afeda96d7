//! Windows error code handling utilities

use crate::core::types::{MemoryError, ProcessId};
use std::fmt;

/// Windows error codes the crate reacts to; everything else is `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    AccessDenied,
    InsufficientBuffer,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            5 => ErrorCode::AccessDenied,
            122 => ErrorCode::InsufficientBuffer,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error
    #[cfg(windows)]
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(winapi::um::errhandlingapi::GetLastError()) }
    }

    /// Raw numeric value
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::AccessDenied => 5,
            ErrorCode::InsufficientBuffer => 122,
            ErrorCode::Unknown(code) => *code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// A failed OS call: which operation and what the system reported
pub struct WinError {
    code: ErrorCode,
    operation: String,
}

impl WinError {
    /// Capture the last error for `operation`
    #[cfg(windows)]
    pub fn last(operation: impl Into<String>) -> Self {
        WinError {
            code: ErrorCode::last_error(),
            operation: operation.into(),
        }
    }

    /// Create with specific error code
    pub fn with_code(code: ErrorCode, operation: impl Into<String>) -> Self {
        WinError {
            code,
            operation: operation.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Convert to MemoryError, keeping the system message text
    pub fn to_memory_error(self) -> MemoryError {
        let message = system_message(self.code);
        MemoryError::system_call(self.operation, self.code.code(), message)
    }

    /// Like [`to_memory_error`](Self::to_memory_error), but an insufficient
    /// buffer becomes [`MemoryError::BufferTooSmall`] so the caller can grow it
    pub fn to_buffer_error(self, capacity: usize) -> MemoryError {
        if self.code == ErrorCode::InsufficientBuffer {
            MemoryError::buffer_too_small(capacity.saturating_mul(2), capacity)
        } else {
            self.to_memory_error()
        }
    }

    /// Like [`to_memory_error`](Self::to_memory_error), but access denied
    /// becomes [`MemoryError::AccessDenied`] for `pid`
    pub fn to_process_error(self, pid: ProcessId) -> MemoryError {
        if self.code == ErrorCode::AccessDenied {
            MemoryError::access_denied(pid, system_message(self.code))
        } else {
            self.to_memory_error()
        }
    }
}

/// Text the system associates with an error code
#[cfg(windows)]
pub fn system_message(code: ErrorCode) -> String {
    let hresult = windows::core::HRESULT::from_win32(code.code());
    let message = windows::core::Error::from(hresult).message().to_string();
    let message = message.trim_end();
    if message.is_empty() {
        code.to_string()
    } else {
        message.to_string()
    }
}

/// Text the system associates with an error code
#[cfg(not(windows))]
pub fn system_message(code: ErrorCode) -> String {
    code.to_string()
}

/// Get last Windows error as MemoryError
#[cfg(windows)]
pub fn last_error_as_memory_error(operation: impl Into<String>) -> MemoryError {
    WinError::last(operation).to_memory_error()
}

/// Last Windows error from a call that fills a buffer of `capacity` elements
#[cfg(windows)]
pub fn last_error_as_buffer_error(operation: impl Into<String>, capacity: usize) -> MemoryError {
    WinError::last(operation).to_buffer_error(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_conversion() {
        assert_eq!(ErrorCode::from(0), ErrorCode::Unknown(0));
        assert_eq!(ErrorCode::from(5), ErrorCode::AccessDenied);
        assert_eq!(ErrorCode::from(299), ErrorCode::Unknown(299));
        assert_eq!(ErrorCode::from(122), ErrorCode::InsufficientBuffer);
        assert_eq!(ErrorCode::from(999), ErrorCode::Unknown(999));
    }

    #[test]
    fn test_error_code_round_trip() {
        for code in [0, 5, 6, 87, 122, 299, 1234] {
            assert_eq!(ErrorCode::from(code).code(), code);
        }
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::InsufficientBuffer), "Insufficient buffer");
        assert_eq!(format!("{}", ErrorCode::AccessDenied), "Access denied");
        assert_eq!(format!("{}", ErrorCode::Unknown(123)), "Unknown error: 123");
    }

    #[test]
    fn test_win_error() {
        let err = WinError::with_code(ErrorCode::Unknown(6), "MiniDumpWriteDump");
        match err.to_memory_error() {
            MemoryError::SystemCall {
                operation, code, ..
            } => {
                assert_eq!(operation, "MiniDumpWriteDump");
                assert_eq!(code, 6);
            }
            other => panic!("Expected SystemCall, got {:?}", other),
        }
    }

    #[test]
    fn test_process_error_classifies_access_denied() {
        let err = WinError::with_code(ErrorCode::AccessDenied, "OpenProcess").to_process_error(4);
        assert!(err.is_access_denied());

        let err = WinError::with_code(ErrorCode::Unknown(87), "OpenProcess").to_process_error(4);
        assert!(matches!(err, MemoryError::SystemCall { code: 87, .. }));
    }

    #[test]
    fn test_buffer_error_classifies_insufficient_buffer() {
        let err = WinError::with_code(ErrorCode::InsufficientBuffer, "GetModuleBaseNameW")
            .to_buffer_error(260);
        assert!(err.is_insufficient_buffer());

        let err = WinError::with_code(ErrorCode::Unknown(299), "GetModuleBaseNameW")
            .to_buffer_error(260);
        assert!(matches!(err, MemoryError::SystemCall { code: 299, .. }));
    }
}
