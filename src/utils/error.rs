use crate::domain::model::Failure;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Request timed out after {after:?}")]
    TimeoutError { after: Duration },

    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ServerError { status: u16, message: Option<String> },

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RegistrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::TimeoutError { .. } => ErrorCategory::Network,
            Self::ServerError { .. } => ErrorCategory::Server,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::UrlError(_)
            | Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Server => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::TimeoutError { .. } | Self::SerializationError(_) => {
                "Unable to connect to the server.".to_string()
            }
            Self::ServerError { message, .. } => message
                .clone()
                .unwrap_or_else(|| "The server rejected the request.".to_string()),
            other => format!("Configuration problem: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and that the registration server is running, then try again.",
            ErrorCategory::Server => "Check the submitted details and try again.",
            ErrorCategory::Data => "The server sent an unexpected response; contact the event organisers.",
            ErrorCategory::Configuration => "Check --base-url and the TOML configuration file.",
        }
    }

    /// Collapses the error into what a screen needs to know: did the server
    /// say no, or could it not be reached at all. Malformed bodies count as
    /// unreachable.
    pub fn to_failure(&self) -> Failure {
        match self {
            Self::ServerError { message, .. } => Failure::Rejected {
                message: message.clone(),
            },
            _ => Failure::Unreachable,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_rejected() {
        let err = RegistrationError::ServerError {
            status: 404,
            message: Some("Employee ID not found".to_string()),
        };
        assert_eq!(
            err.to_failure(),
            Failure::Rejected {
                message: Some("Employee ID not found".to_string())
            }
        );
        assert_eq!(err.category(), ErrorCategory::Server);
        assert_eq!(err.user_friendly_message(), "Employee ID not found");
    }

    #[test]
    fn test_timeout_and_parse_errors_are_unreachable() {
        let timeout = RegistrationError::TimeoutError {
            after: Duration::from_secs(5),
        };
        assert_eq!(timeout.to_failure(), Failure::Unreachable);
        assert_eq!(timeout.severity(), ErrorSeverity::Medium);

        let parse: RegistrationError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(parse.to_failure(), Failure::Unreachable);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = RegistrationError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("api.base_url"));
    }
}
