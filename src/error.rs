/*!
 * Error types for kubefetch
 */

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KubefetchError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_IO: i32 = 1;
pub const EXIT_FATAL: i32 = 2;
pub const EXIT_REMOTE: i32 = 3;
pub const EXIT_PARSE: i32 = 4;
pub const EXIT_ABORTED: i32 = 5;

#[derive(Error, Debug)]
pub enum KubefetchError {
    /// Empty or malformed input, rejected before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// No cluster with this name in the directory
    #[error("cluster '{name}' not found")]
    ClusterNotFound { name: String },

    /// Cluster exists but has no (or more than one) master node
    #[error("cluster '{cluster}' has no unique master node")]
    MasterNotFound { cluster: String },

    /// SSH session or passphrase acquisition failed
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Remote command could not run or produced unusable output
    #[error("Remote error: {0}")]
    Remote(String),

    /// Credential document could not be parsed for display
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operator declined to overwrite an existing kubeconfig
    #[error("aborted")]
    ConfirmationDeclined,

    /// Local filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KubefetchError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        KubefetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            KubefetchError::Validation(_)
            | KubefetchError::ClusterNotFound { .. }
            | KubefetchError::MasterNotFound { .. }
            | KubefetchError::Config(_)
            | KubefetchError::Authentication(_) => EXIT_FATAL,
            KubefetchError::Remote(_) => EXIT_REMOTE,
            KubefetchError::Parse(_) => EXIT_PARSE,
            KubefetchError::ConfirmationDeclined => EXIT_ABORTED,
            KubefetchError::Io { .. } => EXIT_IO,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            KubefetchError::Validation(_)
            | KubefetchError::ClusterNotFound { .. }
            | KubefetchError::MasterNotFound { .. } => ErrorCategory::Validation,
            KubefetchError::Authentication(_) => ErrorCategory::Security,
            KubefetchError::Remote(_) => ErrorCategory::Network,
            KubefetchError::Parse(_) => ErrorCategory::Codec,
            KubefetchError::ConfirmationDeclined => ErrorCategory::Aborted,
            KubefetchError::Io { .. } => ErrorCategory::IoError,
            KubefetchError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Hint shown under the error message, if any
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            KubefetchError::ClusterNotFound { .. } => {
                Some("check the [[clusters]] entries in your kubefetch config")
            }
            KubefetchError::Authentication(_) => {
                Some("verify the SSH key name and passphrase for the master node")
            }
            KubefetchError::ConfirmationDeclined => {
                Some("use -f to overwrite without asking, or -p to print instead")
            }
            _ => None,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input or lookup errors caught before any remote work
    Validation,
    /// Authentication errors
    Security,
    /// Remote execution errors
    Network,
    /// Document parsing errors
    Codec,
    /// Operator chose to stop
    Aborted,
    /// Local I/O errors
    IoError,
    /// Configuration errors
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Security => write!(f, "security"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Codec => write!(f, "codec"),
            ErrorCategory::Aborted => write!(f, "aborted"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Configuration => write!(f, "configuration"),
        }
    }
}

impl From<serde_yaml::Error> for KubefetchError {
    fn from(err: serde_yaml::Error) -> Self {
        KubefetchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            KubefetchError::Validation("empty".to_string()),
            KubefetchError::ClusterNotFound {
                name: "demo".to_string(),
            },
            KubefetchError::MasterNotFound {
                cluster: "demo".to_string(),
            },
            KubefetchError::Authentication("bad passphrase".to_string()),
            KubefetchError::Remote("exit 1".to_string()),
            KubefetchError::Parse("bad yaml".to_string()),
            KubefetchError::ConfirmationDeclined,
            KubefetchError::io("/tmp/x", io::Error::other("boom")),
            KubefetchError::Config("bad toml".to_string()),
        ];

        for err in errors {
            assert_ne!(err.exit_code(), EXIT_SUCCESS, "{} must fail the process", err);
        }
    }

    #[test]
    fn test_declined_is_distinct_from_io() {
        let declined = KubefetchError::ConfirmationDeclined;
        let io_err = KubefetchError::io("/tmp/x", io::Error::other("boom"));

        assert_eq!(declined.exit_code(), EXIT_ABORTED);
        assert_eq!(io_err.exit_code(), EXIT_IO);
        assert_ne!(declined.category(), io_err.category());
    }

    #[test]
    fn test_error_display() {
        let err = KubefetchError::ClusterNotFound {
            name: "demo".to_string(),
        };
        assert_eq!(err.to_string(), "cluster 'demo' not found");
        assert_eq!(KubefetchError::ConfirmationDeclined.to_string(), "aborted");

        let err = KubefetchError::io("/home/u/.kube", io::Error::other("denied"));
        assert_eq!(err.to_string(), "I/O error at /home/u/.kube: denied");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            KubefetchError::MasterNotFound {
                cluster: "c".to_string()
            }
            .category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            KubefetchError::Authentication("x".to_string()).category(),
            ErrorCategory::Security
        );
        assert_eq!(
            KubefetchError::Remote("x".to_string()).category(),
            ErrorCategory::Network
        );
        assert_eq!(ErrorCategory::Codec.to_string(), "codec");
    }

    #[test]
    fn test_yaml_error_becomes_parse_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: KubefetchError = yaml_err.into();
        assert!(matches!(err, KubefetchError::Parse(_)));
    }
}
