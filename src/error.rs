//! Error handling for hash-forge

use thiserror::Error;

/// Main error type for hash-forge
#[derive(Error, Debug, Clone)]
pub enum HashForgeError {
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("Hash failure ({algorithm}): {message}")]
    HashFailure { algorithm: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HashForgeError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a hash failure error
    pub fn hash_failure(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HashFailure {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument { argument, message } => {
                format!("❌ Invalid {}: {}\n💡 Check HASH_FORGE_* variables and the iteration bound", argument, message)
            }
            Self::HashFailure { algorithm, message } => {
                format!("❌ {} digest failed: {}\n💡 This is a bug in the hashing backend, please report it", algorithm, message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 The report file may be corrupt", message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<serde_json::Error> for HashForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for HashForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HashForgeError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! invalid_argument {
    ($arg:expr, $msg:expr) => {
        $crate::error::HashForgeError::invalid_argument($arg, $msg)
    };
    ($arg:expr, $fmt:expr, $($rest:tt)*) => {
        $crate::error::HashForgeError::invalid_argument($arg, format!($fmt, $($rest)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::HashForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::HashForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::HashForgeError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::HashForgeError::internal(format!($fmt, $($arg)*))
    };
}
