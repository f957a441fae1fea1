use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Object storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Migration failed: {migration}")]
    MigrationFailed { migration: String },

    #[error("Query execution failed: {query}")]
    QueryFailed { query: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Object not found: {key}")]
    ObjectNotFound { key: String },

    #[error("Object expired: {key}")]
    Expired { key: String },

    #[error("Request failed for {key}: status {status}")]
    RequestFailed { key: String, status: u16 },

    #[error("Invalid object body for {key}: {details}")]
    InvalidBody { key: String, details: String },

    #[error("Invalid endpoint URL: {endpoint}")]
    InvalidEndpoint { endpoint: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable not set: {var_name}")]
    MissingEnvironmentVariable { var_name: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
