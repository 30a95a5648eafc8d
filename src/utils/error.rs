use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Unreadable document: {reason}")]
    DocumentFormat { reason: String },

    #[error("Document fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Record store error: {message}")]
    Persistence { message: String },

    #[error("Job broker error: {message}")]
    Broker { message: String },

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Job {0} is not finished yet")]
    JobNotReady(Uuid),

    #[error("Job {id} failed: {reason}")]
    JobFailed { id: Uuid, reason: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
