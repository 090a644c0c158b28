use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::enums::draft_field::DraftField;

#[derive(Debug, Clone, Error)]
pub enum PortalError {
    // Local validation errors, never reach the network
    #[error("validation failed for {} field(s)", errors.len())]
    Validation {
        errors: BTreeMap<DraftField, String>,
    },

    // Authentication errors
    #[error("authentication error: {reason}")]
    Authentication {
        reason: String,
    },
    #[error("login rejected")]
    LoginFailed,
    #[error("session expired during {operation}")]
    SessionExpired {
        operation: String,
    },

    // Network/API errors
    #[error("network error during {operation}: {reason}")]
    Network {
        operation: String,
        url: Option<String>,
        reason: String,
    },
    #[error("HTTP {status} during {operation}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },
    #[error("could not parse {content_type}: {reason}")]
    Parse {
        content_type: String,
        reason: String,
    },

    // Local system errors
    #[error("token storage error at '{path}': {reason}")]
    Storage {
        path: String,
        reason: String,
    },
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        suggestion: Option<String>,
    },

    // Editor rejections
    #[error("{operation} does not apply to the selected field ({field})")]
    FieldMismatch {
        operation: String,
        field: String,
    },
    #[error("port rejected: {reason}")]
    PortRejected {
        input: String,
        reason: String,
    },
    #[error("group rejected: {reason}")]
    GroupRejected {
        name: String,
        reason: String,
    },
    #[error("request {request_id} is not one of your approved requests")]
    UnknownTarget {
        request_id: i64,
    },
    #[error("{item} #{id} is not in the pending queue")]
    UnknownReviewItem {
        item: String,
        id: i64,
    },
    #[error("draft is not valid for submission")]
    InvalidDraft {
        errors: BTreeMap<DraftField, String>,
    },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

impl PortalError {
    pub fn network(operation: &str, url: Option<&str>, reason: &str) -> Self {
        Self::Network {
            operation: operation.to_string(),
            url: url.map(|s| s.to_string()),
            reason: reason.to_string(),
        }
    }

    pub fn api(operation: &str, status: u16, message: &str) -> Self {
        Self::Api {
            operation: operation.to_string(),
            status,
            message: message.to_string(),
        }
    }

    pub fn auth(reason: &str) -> Self {
        Self::Authentication {
            reason: reason.to_string(),
        }
    }

    pub fn storage(path: &str, reason: &str) -> Self {
        Self::Storage {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::Configuration {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn field_mismatch(operation: &str, field: &str) -> Self {
        Self::FieldMismatch {
            operation: operation.to_string(),
            field: field.to_string(),
        }
    }

    pub fn port_rejected(input: &str, reason: &str) -> Self {
        Self::PortRejected {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn group_rejected(name: &str, reason: &str) -> Self {
        Self::GroupRejected {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Errors the user can retry without changing anything locally.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::SubmissionInFlight => true,
            Self::LoginFailed => true,
            Self::Validation { .. } => true,
            Self::PortRejected { .. } => true,
            Self::GroupRejected { .. } => true,
            Self::Storage { .. } => false,
            Self::Configuration { .. } => false,
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Storage { .. } => ErrorSeverity::High,
            Self::Configuration { .. } => ErrorSeverity::High,
            Self::InvalidDraft { .. } => ErrorSeverity::High,
            Self::SessionExpired { .. } => ErrorSeverity::Medium,
            Self::Authentication { .. } => ErrorSeverity::Medium,
            Self::Network { .. } => ErrorSeverity::Medium,
            Self::Api { .. } => ErrorSeverity::Medium,
            Self::Parse { .. } => ErrorSeverity::Medium,
            Self::LoginFailed => ErrorSeverity::Low,
            Self::Validation { .. } => ErrorSeverity::Low,
            Self::FieldMismatch { .. } => ErrorSeverity::Low,
            Self::PortRejected { .. } => ErrorSeverity::Low,
            Self::GroupRejected { .. } => ErrorSeverity::Low,
            Self::UnknownTarget { .. } => ErrorSeverity::Low,
            Self::UnknownReviewItem { .. } => ErrorSeverity::Low,
            Self::SubmissionInFlight => ErrorSeverity::Low,
        }
    }

    /// Display string for the user. Never contains credentials or raw bodies.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { errors } | Self::InvalidDraft { errors } => {
                let mut msg = String::from("Please fix the following fields:");
                for (field, error) in errors {
                    msg.push_str(&format!("\n  - {}: {}", field.label(), error));
                }
                msg
            }
            Self::Authentication { .. } => {
                "Your session is not valid. Please log in again.".to_string()
            }
            Self::LoginFailed => {
                "Login failed. Please check your credentials.".to_string()
            }
            Self::SessionExpired { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::Network { operation, .. } => {
                format!("Could not reach the portal during {}.\n💡 Check your connection and try again", operation)
            }
            Self::Api { operation, status, message } => {
                let mut msg = format!("The portal rejected {} (HTTP {})", operation, status);
                if !message.is_empty() {
                    msg.push_str(&format!(": {}", message));
                }
                if self.is_recoverable() {
                    msg.push_str("\n💡 Please try again in a moment");
                }
                msg
            }
            Self::Parse { content_type, .. } => {
                format!("The portal sent an unexpected {} response. Please try again.", content_type)
            }
            Self::Storage { path, reason } => {
                format!("Could not access token storage at '{}': {}\n💡 Check file permissions", path, reason)
            }
            Self::Configuration { message, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::FieldMismatch { operation, field } => {
                format!("'{}' cannot be used while editing {}", operation, field)
            }
            Self::PortRejected { input, reason } => {
                format!("Port '{}' was not added: {}", input, reason)
            }
            Self::GroupRejected { name, reason } => {
                format!("Group '{}' was not created: {}", name, reason)
            }
            Self::UnknownTarget { request_id } => {
                format!("Request #{} is not one of your approved requests", request_id)
            }
            Self::UnknownReviewItem { item, id } => {
                format!("{} #{} is no longer pending", item, id)
            }
            Self::SubmissionInFlight => {
                "A submission is already in progress. Please wait.".to_string()
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

/// Error handler for consistent error processing at the command boundary
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn handle_error(error: &PortalError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 You can retry the operation");
        }
    }
}

impl From<std::io::Error> for PortalError {
    fn from(error: std::io::Error) -> Self {
        PortalError::Storage {
            path: "<unknown>".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(error: serde_json::Error) -> Self {
        PortalError::Parse {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for PortalError {
    fn from(error: toml::de::Error) -> Self {
        PortalError::Configuration {
            message: error.message().to_string(),
            suggestion: Some("Run 'gpulab init' to regenerate a sample config".to_string()),
        }
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return PortalError::Parse {
                content_type: "JSON".to_string(),
                reason: error.to_string(),
            };
        }
        PortalError::Network {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            reason: error.to_string(),
        }
    }
}
