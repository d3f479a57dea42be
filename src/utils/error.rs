use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Permission denied: role '{role}' cannot {capability}")]
    PermissionDenied { role: String, capability: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
    Permission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LeagueError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LeagueError::IoError(_) => ErrorCategory::Io,
            LeagueError::SerializationError(_)
            | LeagueError::CsvError(_)
            | LeagueError::ProcessingError { .. } => ErrorCategory::Data,
            LeagueError::ConfigError { .. }
            | LeagueError::MissingConfigError { .. }
            | LeagueError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LeagueError::ValidationError { .. } => ErrorCategory::Validation,
            LeagueError::PermissionDenied { .. } => ErrorCategory::Permission,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Validation | ErrorCategory::Permission => {
                ErrorSeverity::High
            }
        }
    }

    /// CLI 結束碼，依嚴重程度決定
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
            LeagueError::IoError(_) => "Check that the data file exists and the output directory is writable",
            LeagueError::SerializationError(_) => {
                "Make sure the league snapshot is valid JSON with teams, players and matches arrays"
            }
            LeagueError::CsvError(_) => "Re-run the export; the CSV writer could not encode a row",
            LeagueError::ConfigError { .. } => "Check the TOML syntax of the configuration file",
            LeagueError::MissingConfigError { .. } => "Add the missing field to the configuration file or pass it on the command line",
            LeagueError::InvalidConfigValueError { .. } => "Correct the highlighted configuration value",
            LeagueError::ProcessingError { .. } => "Inspect the input records for unexpected content",
            LeagueError::ValidationError { .. } => {
                "Fix the offending team, player or match record upstream and retry"
            }
            LeagueError::PermissionDenied { .. } => "Sign in with a role that has this capability",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LeagueError::IoError(e) => format!("Could not read or write a file: {}", e),
            LeagueError::SerializationError(e) => format!("The league data could not be parsed: {}", e),
            LeagueError::ValidationError { message } => format!("Invalid league data: {}", message),
            LeagueError::PermissionDenied { role, capability } => {
                format!("A {} is not allowed to {}", role, capability)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
