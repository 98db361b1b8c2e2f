use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Feed request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Alert delivery failed: {0}")]
    DeliveryError(#[from] lettre::transport::smtp::Error),

    #[error("Alert message could not be built: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("Invalid mailbox address: {0}")]
    AddressError(#[from] lettre::address::AddressError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, WatchError>;
