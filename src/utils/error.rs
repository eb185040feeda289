use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Model hub request failed: {0}")]
    HubError(#[from] hf_hub::api::tokio::ApiError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Model '{model}' has no {artifact}")]
    MissingArtifactError { model: String, artifact: String },

    #[error("Response is missing field '{field}'")]
    MissingFieldError { field: String },

    #[error("Invalid input '{input}': {reason}")]
    InvalidInputError { input: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    FileSystem,
    Configuration,
    Data,
    UserInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SetupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SetupError::HubError(_) | SetupError::ApiError(_) => ErrorCategory::Network,
            SetupError::IoError(_) => ErrorCategory::FileSystem,
            SetupError::ConfigError { .. }
            | SetupError::ConfigValidationError { .. }
            | SetupError::InvalidConfigValueError { .. }
            | SetupError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SetupError::SerializationError(_)
            | SetupError::MissingArtifactError { .. }
            | SetupError::MissingFieldError { .. } => ErrorCategory::Data,
            SetupError::InvalidInputError { .. } => ErrorCategory::UserInput,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::UserInput => {
                ErrorSeverity::High
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SetupError::HubError(_) => "無法從模型中心下載模型檔案".to_string(),
            SetupError::ApiError(_) => "無法連線到 Ensembl REST API".to_string(),
            SetupError::IoError(e) => format!("檔案系統操作失敗: {}", e),
            SetupError::MissingArtifactError { model, artifact } => {
                format!("模型 {} 缺少 {}", model, artifact)
            }
            SetupError::MissingFieldError { field } => {
                format!("Ensembl 回應缺少 '{}' 欄位", field)
            }
            SetupError::InvalidInputError { input, reason } => {
                format!("輸入 '{}' 無效: {}", input, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SetupError::HubError(_) => {
                "Check network access to huggingface.co and that the model id and revision exist"
            }
            SetupError::ApiError(_) => "Check network access to rest.ensembl.org",
            SetupError::IoError(_) => "Check that the output directories are writable",
            SetupError::SerializationError(_) => "The server returned malformed JSON; retry later",
            SetupError::ConfigError { .. }
            | SetupError::ConfigValidationError { .. }
            | SetupError::InvalidConfigValueError { .. }
            | SetupError::MissingConfigError { .. } => {
                "Fix the command line flags or the TOML configuration file"
            }
            SetupError::MissingArtifactError { .. } => {
                "Pick a model repository that ships config, weights and tokenizer files"
            }
            SetupError::MissingFieldError { .. } => "Verify the sequence id refers to a sequence",
            SetupError::InvalidInputError { .. } => {
                "Enter a non-empty id and 1-based positions with start <= end"
            }
        }
    }

    /// 依嚴重程度決定行程結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
