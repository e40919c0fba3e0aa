use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Store error: {message}")]
    StoreError {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Store,
    Io,
    Format,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InventoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
            source: None,
        }
    }

    pub fn store_with_cause<E>(message: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StoreError {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn is_store(&self) -> bool {
        matches!(self, Self::StoreError { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::StoreError { .. } => ErrorCategory::Store,
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Format,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Io | ErrorCategory::Format => ErrorSeverity::Medium,
            ErrorCategory::Store => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Check the prefix (2-4 characters) and that every code starts with it"
            }
            ErrorCategory::Store => {
                "Check the store location in the configuration and that the database is not locked"
            }
            ErrorCategory::Io => "Check that the file exists and is readable/writable",
            ErrorCategory::Format => "Check the output destination and retry the export",
            ErrorCategory::Configuration => {
                "Fix the configuration file or delete it to regenerate the defaults"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Invalid inventory data: {}", message),
            Self::StoreError { message, .. } => format!("Database access failed: {}", message),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::CsvError(e) => format!("Could not render CSV: {}", e),
            Self::SerializationError(e) => format!("Could not render JSON: {}", e),
            other => format!("Configuration problem: {}", other),
        }
    }
}

impl From<rusqlite::Error> for InventoryError {
    fn from(err: rusqlite::Error) -> Self {
        let message = err.to_string();
        Self::store_with_cause(message, err)
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_store_error_keeps_cause() {
        let cause = InventoryError::validation("duplicate code");
        let err = InventoryError::store_with_cause("loading IC", cause);

        assert!(err.is_store());
        assert_eq!(err.to_string(), "Store error: loading IC");
        let source = err.source().unwrap();
        assert!(source.to_string().contains("duplicate code"));
    }

    #[test]
    fn test_severity_follows_category() {
        assert_eq!(
            InventoryError::validation("x").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(InventoryError::store("x").severity(), ErrorSeverity::High);
        assert_eq!(
            InventoryError::ConfigError {
                message: "bad".to_string()
            }
            .severity(),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_rusqlite_error_becomes_store_error() {
        let err: InventoryError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.category(), ErrorCategory::Store);
        assert!(err.source().is_some());
    }
}
