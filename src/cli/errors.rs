//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file unreadable or invalid
    ConfigError,
    /// stdout / filesystem error
    IoError,
    /// `init` found an existing data file
    AlreadyInitialized,
    /// Store could not be opened or an operation failed
    StoreFailed,
    /// Runtime or listener could not start
    BootFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PRODUCTDB_CLI_CONFIG_ERROR",
            Self::IoError => "PRODUCTDB_CLI_IO_ERROR",
            Self::AlreadyInitialized => "PRODUCTDB_CLI_ALREADY_INITIALIZED",
            Self::StoreFailed => "PRODUCTDB_CLI_STORE_FAILED",
            Self::BootFailed => "PRODUCTDB_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug, Error)]
#[error("{}: {message}", .code.code())]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn already_initialized(path: impl std::fmt::Display) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Data file already exists: {}", path),
        )
    }

    pub fn store_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreFailed, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::store_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad port");
        assert_eq!(err.to_string(), "PRODUCTDB_CLI_CONFIG_ERROR: bad port");
        assert_eq!(err.code(), CliErrorCode::ConfigError);
        assert_eq!(err.message(), "bad port");
    }

    #[test]
    fn test_from_store_error() {
        let err: CliError = StoreError::NotFound(2).into();
        assert_eq!(err.code(), CliErrorCode::StoreFailed);
    }
}
