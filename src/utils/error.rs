use std::fmt;
use thiserror::Error;

/// 解析失敗時所在的語法欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Priority,
    Version,
    Timestamp,
    Hostname,
    Source,
    Appname,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Priority => "priority",
            Field::Version => "version",
            Field::Timestamp => "timestamp",
            Field::Hostname => "hostname",
            Field::Source => "source",
            Field::Appname => "appname",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid frame length token {token:?} at byte {offset}")]
    InvalidLength { offset: usize, token: String },

    #[error("frame at byte {offset} declares {declared} bytes but only {remaining} remain")]
    Truncated {
        offset: usize,
        declared: usize,
        remaining: usize,
    },

    #[error("frame at byte {offset} is not valid UTF-8: {source}")]
    InvalidEncoding {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed message: expected {field}")]
    Malformed { field: Field },

    #[error("bad priority {value:?}")]
    BadPriority { value: String },

    #[error("bad timestamp {value:?}")]
    BadTimestamp { value: String },

    #[error("bad appname {value:?}: {reason}")]
    BadAppname { value: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("framing failed: {0}")]
    Framing(#[from] FrameError),

    #[error("frame {index} failed to parse: {cause}")]
    Parsing {
        index: usize,
        #[source]
        cause: ParseError,
    },

    #[error("expected {expected} frames but found {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("missing header {name}")]
    MissingHeader { name: String },

    #[error("header {name} is {actual:?}, expected {expected:?}")]
    UnexpectedHeader {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("invalid Logplex-Msg-Count {value:?}")]
    InvalidMsgCount { value: String },

    #[error("request has no body")]
    MissingBody,

    #[error("body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[derive(Error, Debug)]
pub enum DrainError {
    #[error("Batch processing error: {0}")]
    BatchError(#[from] BatchError),

    #[error("Drain request rejected: {0}")]
    RequestError(#[from] RequestError),

    #[error("Notification failed: {0}")]
    NotifyError(#[from] reqwest::Error),

    #[error("Notification rejected with status {status}: {body}")]
    NotifyStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Delivery,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DrainError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrainError::BatchError(_) | DrainError::RequestError(_) => ErrorCategory::Input,
            DrainError::ConfigError { .. } | DrainError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            DrainError::NotifyError(_) | DrainError::NotifyStatusError { .. } => {
                ErrorCategory::Delivery
            }
            DrainError::IoError(_) | DrainError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應到 HTTP 回應狀態碼 (lambda 使用)
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            ErrorCategory::Delivery => 502,
            ErrorCategory::Configuration | ErrorCategory::System => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrainError::BatchError(BatchError::Framing(_)) => {
                "Check that the payload uses octet-counting framing (\"<len> <msg>\")"
            }
            DrainError::BatchError(BatchError::Parsing { .. }) => {
                "Inspect the failing frame; it does not match the logplex syslog layout"
            }
            DrainError::BatchError(BatchError::CountMismatch { .. }) => {
                "Verify Logplex-Msg-Count against the number of frames in the body"
            }
            DrainError::RequestError(_) => {
                "Make sure the drain is configured as an HTTPS logplex drain"
            }
            DrainError::NotifyError(_) | DrainError::NotifyStatusError { .. } => {
                "Check the webhook URL and network connectivity"
            }
            DrainError::ConfigError { .. } | DrainError::InvalidConfigValueError { .. } => {
                "Review the configuration file and environment variables"
            }
            DrainError::IoError(_) => "Check that the file exists and is readable",
            DrainError::SerializationError(_) => "This is likely a bug, please report it",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrainError::BatchError(e) => format!("Could not process log batch: {}", e),
            DrainError::RequestError(e) => format!("Rejected drain request: {}", e),
            DrainError::NotifyError(_) | DrainError::NotifyStatusError { .. } => {
                "Could not deliver grouped logs to the webhook".to_string()
            }
            DrainError::ConfigError { message } => format!("Configuration problem: {}", message),
            DrainError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            DrainError::IoError(e) => format!("File error: {}", e),
            DrainError::SerializationError(e) => format!("Serialization error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrainError>;
