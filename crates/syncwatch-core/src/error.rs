//! Error types for SyncWatch

use std::path::PathBuf;

/// SyncWatch error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Log not in catalog: {0}")]
    NotFound(String),

    #[error("Log not readable: {0}")]
    Unreadable(PathBuf),

    #[error("File too large: {path} is {size} bytes (limit {limit})")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Invalid status file: {0}")]
    InvalidStatus(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for SyncWatch
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Error::NotFound(what.into())
    }

    /// Stable text shown to the operator in place of log content
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "Access denied: Invalid log file.",
            Error::Unreadable(_) => "Log not readable or does not exist.",
            Error::TooLarge { .. } => "File too large for download.",
            Error::InvalidStatus(_) => "Invalid status file",
            Error::IoError(_) => "Error reading log file.",
            Error::ConfigError(_) | Error::JsonError(_) | Error::TomlError(_) => {
                "An internal error occurred."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("apache-error");
        assert_eq!(err.to_string(), "Log not in catalog: apache-error");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(err.user_message(), "Error reading log file.");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::not_found("/etc/passwd").user_message(),
            "Access denied: Invalid log file."
        );
        assert_eq!(
            Error::Unreadable(PathBuf::from("/home/x.log")).user_message(),
            "Log not readable or does not exist."
        );
        let too_large = Error::TooLarge {
            path: PathBuf::from("/home/x.log"),
            size: 11,
            limit: 10,
        };
        assert_eq!(too_large.user_message(), "File too large for download.");
    }
}
