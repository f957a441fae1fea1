use crate::error::*;
use tracing::{error, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Database(e) => {
                error!("Database error details: {:?}", e);
            }
            CoreError::Storage(e) => {
                error!("Object storage error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::Database(e) => e.is_retryable(),
            CoreError::Storage(e) => e.is_retryable(),
            CoreError::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Database(e) => e.user_friendly_message(),
            CoreError::Storage(e) => e.user_friendly_message(),
            CoreError::Config(ConfigError::MissingEnvironmentVariable { var_name }) => {
                format!("Missing configuration: set the {} environment variable.", var_name)
            }
            CoreError::Config(_) => {
                "Invalid configuration. Please check the settings and try again.".to_string()
            }
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { .. } => {
                "Invalid input provided. Please check your input and try again.".to_string()
            }
            CoreError::NotFound { resource } => format!("Could not find: {}", resource),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Database(_) => "DATABASE".to_string(),
            CoreError::Storage(_) => "STORAGE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::NotFound { .. } => "NOT_FOUND".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for DatabaseError {
    fn log_error(&self) -> &Self {
        error!("DatabaseError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("DatabaseError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            DatabaseError::ConnectionFailed { .. } => true,
            DatabaseError::Sql(sqlx::Error::PoolTimedOut) => true,
            DatabaseError::Sql(sqlx::Error::Io(_)) => true,
            _ => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            DatabaseError::ConnectionFailed { .. } => {
                "Could not reach the database. Please try again later.".to_string()
            }
            DatabaseError::UserNotFound { user_id } => {
                format!("Unknown user: {}", user_id)
            }
            _ => "A database error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        "DATABASE".to_string()
    }
}

impl ErrorExt for StorageError {
    fn log_error(&self) -> &Self {
        error!("StorageError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("StorageError (warning): {}", self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            StorageError::RequestFailed { status, .. } => *status >= 500,
            StorageError::ObjectNotFound { .. } => false,
            StorageError::Expired { .. } => false,
            StorageError::InvalidBody { .. } => false,
            StorageError::InvalidEndpoint { .. } => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StorageError::ObjectNotFound { .. } | StorageError::Expired { .. } => {
                "No stored data available.".to_string()
            }
            _ => "A storage error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        "STORAGE".to_string()
    }
}
