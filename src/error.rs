/*!
 * Error types for ambkit
 */

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::service::ServiceError;

pub type Result<T> = std::result::Result<T, AmbError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

#[derive(Debug)]
pub enum AmbError {
    /// Configuration error
    Config(String),

    /// Configuration file could not be read or written
    ConfigFile { path: PathBuf, message: String },

    /// I/O error
    Io(io::Error),

    /// Remote service error
    Service(ServiceError),

    /// A command-line argument could not be turned into a request
    InvalidArgument(String),

    /// A waiter gave up before the resource became available
    WaitFailed { resource: String },

    /// Output serialization failed
    Serialization(String),

    /// Generic error with message
    Other(String),
}

impl AmbError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AmbError::Config(_)
            | AmbError::ConfigFile { .. }
            | AmbError::InvalidArgument(_) => EXIT_FATAL,
            AmbError::Service(err) if err.is_fatal() => EXIT_FATAL,
            _ => EXIT_PARTIAL,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            AmbError::Config(_) | AmbError::ConfigFile { .. } => ErrorCategory::Configuration,
            AmbError::Io(_) => ErrorCategory::IoError,
            AmbError::Service(err) if err.is_transient() => ErrorCategory::Network,
            AmbError::Service(ServiceError::AccessDenied(_)) => ErrorCategory::Security,
            AmbError::Service(_) => ErrorCategory::Remote,
            AmbError::InvalidArgument(_) => ErrorCategory::Validation,
            AmbError::WaitFailed { .. } => ErrorCategory::Waiter,
            AmbError::Serialization(_) => ErrorCategory::Output,
            AmbError::Other(_) => ErrorCategory::Unknown,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Argument validation errors
    Validation,
    /// I/O operation errors
    IoError,
    /// Configuration errors
    Configuration,
    /// Transport-level failures talking to the service
    Network,
    /// Authentication/authorization errors
    Security,
    /// Errors reported by the remote service
    Remote,
    /// Waiter exhaustion
    Waiter,
    /// Output formatting
    Output,
    /// Uncategorized errors
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Security => write!(f, "security"),
            ErrorCategory::Remote => write!(f, "remote"),
            ErrorCategory::Waiter => write!(f, "waiter"),
            ErrorCategory::Output => write!(f, "output"),
            ErrorCategory::Unknown => write!(f, "unknown"),
        }
    }
}

impl fmt::Display for AmbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AmbError::ConfigFile { path, message } => {
                write!(f, "Config file {}: {}", path.display(), message)
            }
            AmbError::Io(err) => write!(f, "I/O error: {}", err),
            AmbError::Service(err) => write!(f, "{}", err),
            AmbError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AmbError::WaitFailed { resource } => {
                write!(f, "Gave up waiting for {} to become available", resource)
            }
            AmbError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            AmbError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AmbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmbError::Io(err) => Some(err),
            AmbError::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AmbError {
    fn from(err: io::Error) -> Self {
        AmbError::Io(err)
    }
}

impl From<ServiceError> for AmbError {
    fn from(err: ServiceError) -> Self {
        AmbError::Service(err)
    }
}

impl From<serde_json::Error> for AmbError {
    fn from(err: serde_json::Error) -> Self {
        AmbError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_fatal() {
        assert_eq!(AmbError::Config("bad".to_string()).exit_code(), EXIT_FATAL);
        assert_eq!(
            AmbError::InvalidArgument("--tag".to_string()).exit_code(),
            EXIT_FATAL
        );
    }

    #[test]
    fn test_service_exit_codes() {
        let denied = AmbError::Service(ServiceError::AccessDenied("nope".to_string()));
        assert_eq!(denied.exit_code(), EXIT_FATAL);

        let throttled = AmbError::Service(ServiceError::Throttling("slow".to_string()));
        assert_eq!(throttled.exit_code(), EXIT_PARTIAL);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            AmbError::Service(ServiceError::Network("reset".to_string())).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            AmbError::Service(ServiceError::AccessDenied("x".to_string())).category(),
            ErrorCategory::Security
        );
        assert_eq!(
            AmbError::Service(ServiceError::NotFound("n-1".to_string())).category(),
            ErrorCategory::Remote
        );
        assert_eq!(ErrorCategory::Waiter.to_string(), "waiter");
    }

    #[test]
    fn test_error_display() {
        let err = AmbError::WaitFailed {
            resource: "network n-123".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Gave up waiting for network n-123 to become available"
        );

        let err = AmbError::ConfigFile {
            path: PathBuf::from("/etc/ambkit.toml"),
            message: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Config file /etc/ambkit.toml: missing");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AmbError = json_err.into();
        assert!(matches!(err, AmbError::Serialization(_)));
    }
}
