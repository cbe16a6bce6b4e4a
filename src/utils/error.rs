use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Table '{table_id}' not found")]
    TableNotFound { table_id: String },

    #[error("Column {column} is out of range for a row with {cells} cells")]
    ColumnOutOfRange { column: usize, cells: usize },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Io,
    Configuration,
    Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::ApiError(_) | DashError::HttpStatus { .. } => ErrorCategory::Network,
            DashError::CsvError(_) | DashError::SerializationError(_) => ErrorCategory::Data,
            DashError::IoError(_) | DashError::ClipboardError { .. } => ErrorCategory::Io,
            DashError::ConfigValidationError { .. } | DashError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            DashError::TableNotFound { .. } | DashError::ColumnOutOfRange { .. } => {
                ErrorCategory::Usage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常下一輪就會恢復
            ErrorCategory::Network => ErrorSeverity::Medium,
            // 參數錯誤會中止整個指令，不能當成警告
            ErrorCategory::Usage | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI; `0` only for warnings that still produced output.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashError::ApiError(_) => "Check that the admin server is reachable and try again",
            DashError::HttpStatus { .. } => "Check that you are logged in as an administrator",
            DashError::CsvError(_) => "Make sure the input file is valid CSV",
            DashError::IoError(_) => "Check file paths and permissions",
            DashError::SerializationError(_) => "The server returned an unexpected payload",
            DashError::ConfigValidationError { .. } | DashError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            DashError::TableNotFound { .. } => "Check the table id",
            DashError::ColumnOutOfRange { .. } => "Pick a column that exists in every row",
            DashError::ClipboardError { .. } => "Copy the value manually",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the server: {}", self),
            ErrorCategory::Data => format!("Could not read the data: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Usage => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
