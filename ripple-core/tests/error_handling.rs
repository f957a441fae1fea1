use ripple_core::{ConfigError, CoreError, DatabaseError, ErrorExt, StorageError};

#[test]
fn test_error_codes() {
    let db_error = CoreError::Database(DatabaseError::ConnectionFailed {
        reason: "refused".to_string(),
    });
    assert_eq!(db_error.error_code(), "DATABASE");

    let storage_error = CoreError::Storage(StorageError::ObjectNotFound {
        key: "recommendations/user-1.json".to_string(),
    });
    assert_eq!(storage_error.error_code(), "STORAGE");

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "database_url".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");
}

#[test]
fn test_retryable_errors() {
    let transient = CoreError::Storage(StorageError::RequestFailed {
        key: "queue/state.json".to_string(),
        status: 503,
    });
    assert!(transient.is_retryable());

    let missing = CoreError::Storage(StorageError::ObjectNotFound {
        key: "queue/state.json".to_string(),
    });
    assert!(!missing.is_retryable());

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "database_url".to_string(),
    });
    assert!(!config_error.is_retryable());
}

#[test]
fn test_user_friendly_messages() {
    let db_error = CoreError::Database(DatabaseError::UserNotFound { user_id: 42 });
    let message = db_error.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("42"));

    let config_error = CoreError::Config(ConfigError::MissingEnvironmentVariable {
        var_name: "S3_ENDPOINT".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("S3_ENDPOINT"));
}
