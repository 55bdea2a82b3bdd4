use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiddleError {
    #[error("Invalid argument: `{arg}` must be a non-null, live reference")]
    InvalidArgument { arg: &'static str },

    #[error("Unknown type: {name}")]
    UnknownType { name: String },

    #[error("Unable to map the following elements: {}", names.join(", "))]
    Unmapped { names: Vec<String> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
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
    Argument,
    Mapping,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MiddleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MiddleError::InvalidArgument { .. } => ErrorCategory::Argument,
            MiddleError::UnknownType { .. } | MiddleError::Unmapped { .. } => {
                ErrorCategory::Mapping
            }
            MiddleError::TomlError(_)
            | MiddleError::ConfigValidationError { .. }
            | MiddleError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MiddleError::IoError(_) | MiddleError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 有部分宣告無法對映，但其餘結果仍可用
            MiddleError::Unmapped { .. } => ErrorSeverity::Medium,
            MiddleError::UnknownType { .. }
            | MiddleError::TomlError(_)
            | MiddleError::ConfigValidationError { .. }
            | MiddleError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            MiddleError::InvalidArgument { .. }
            | MiddleError::IoError(_)
            | MiddleError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MiddleError::InvalidArgument { .. } => {
                "Pass a pointer to a live, initialized instance"
            }
            MiddleError::UnknownType { .. } => {
                "Run with --list to see the declared record names"
            }
            MiddleError::Unmapped { .. } => {
                "Drop --strict to emit the mappable part of the schema"
            }
            MiddleError::TomlError(_) | MiddleError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            MiddleError::InvalidConfigValueError { .. } => {
                "Use a valid C identifier for type and module names"
            }
            MiddleError::IoError(_) => "Check that the file exists and is readable",
            MiddleError::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MiddleError::UnknownType { name } => format!("No record named '{}' is declared", name),
            MiddleError::Unmapped { names } => {
                format!("{} declaration(s) could not be mapped to JSON Schema", names.len())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiddleError>;
