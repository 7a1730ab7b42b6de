use thiserror::Error;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("Username already exists: {user}")]
    DuplicateUser { user: String },

    #[error("Nurse not found: {key}")]
    NurseNotFound { key: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 對應到 CLI 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl HospitalError {
    pub fn validation(message: impl Into<String>) -> Self {
        HospitalError::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(key: impl ToString) -> Self {
        HospitalError::NurseNotFound {
            key: key.to_string(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路問題通常可以重試
            HospitalError::ApiError(_) | HospitalError::ApiStatus { .. } => ErrorSeverity::Medium,
            HospitalError::ValidationError { .. }
            | HospitalError::DuplicateEmail { .. }
            | HospitalError::DuplicateUser { .. }
            | HospitalError::NurseNotFound { .. } => ErrorSeverity::High,
            HospitalError::SerializationError(_) => ErrorSeverity::High,
            HospitalError::IoError(_)
            | HospitalError::UrlError(_)
            | HospitalError::ConfigError { .. }
            | HospitalError::InvalidConfigValueError { .. }
            | HospitalError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HospitalError::ApiError(e) if e.is_timeout() => {
                "The hospital server did not answer in time".to_string()
            }
            HospitalError::ApiError(_) => "Could not reach the hospital server".to_string(),
            HospitalError::ApiStatus { status, .. } => format!("Server error: {}", status),
            HospitalError::SerializationError(_) => {
                "The server sent data in an incompatible format".to_string()
            }
            HospitalError::ValidationError { message } => format!("Error: {}", message),
            HospitalError::DuplicateEmail { .. } => "Error: email already registered".to_string(),
            HospitalError::DuplicateUser { .. } => "Error: username already exists".to_string(),
            HospitalError::NurseNotFound { key } => format!("No nurse matches {}", key),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HospitalError>;
