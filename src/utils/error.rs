use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to fetch order {order_id}: {status} {reason}")]
    OrderFetchError {
        order_id: String,
        status: u16,
        reason: String,
    },

    #[error("CRM {resource} request failed: {status} {reason}")]
    CrmRequestError {
        resource: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Configuration error ({field}): {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid config value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，對應不同的處理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    RemoteApi,
    Configuration,
    Data,
}

/// 錯誤嚴重程度，決定 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::HttpError(_) | SyncError::IoError(_) => ErrorCategory::Transport,
            SyncError::OrderFetchError { .. } | SyncError::CrmRequestError { .. } => {
                ErrorCategory::RemoteApi
            }
            SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SyncError::SerializationError(_) | SyncError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與遠端 API 錯誤通常是暫時性的，重跑一次可能就會成功
            ErrorCategory::Transport | ErrorCategory::RemoteApi => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SyncError::HttpError(_) => {
                "Check network connectivity and that the remote endpoints are reachable".to_string()
            }
            SyncError::IoError(_) => "Check file permissions and that the path exists".to_string(),
            SyncError::SerializationError(_) => {
                "The remote API returned an unexpected payload; inspect the response with --verbose"
                    .to_string()
            }
            SyncError::OrderFetchError { status, .. } => match status {
                401 | 403 => "Verify the commerce API key and password".to_string(),
                404 => "Verify the order id exists in the store".to_string(),
                _ => "The order source returned an error; retry later".to_string(),
            },
            SyncError::CrmRequestError {
                resource, status, ..
            } => match status {
                401 | 403 => "Verify the CRM API token".to_string(),
                _ => format!("The CRM {} endpoint returned an error; retry later", resource),
            },
            SyncError::ConfigValidationError { field, .. }
            | SyncError::InvalidConfigValueError { field, .. }
            | SyncError::MissingConfigError { field } => {
                format!("Fix the '{}' entry in the config file", field)
            }
            SyncError::ProcessingError { .. } => {
                "The order data is incomplete; check the order in the commerce platform".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SyncError::HttpError(e) => format!("Network request failed: {}", e),
            SyncError::OrderFetchError {
                order_id,
                status,
                reason,
            } => {
                format!("Could not fetch order {} ({} {})", order_id, status, reason)
            }
            SyncError::CrmRequestError {
                resource,
                status,
                reason,
            } => {
                format!("CRM {} call failed ({} {})", resource, status, reason)
            }
            SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
