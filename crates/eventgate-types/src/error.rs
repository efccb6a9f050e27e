use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventGateError {
    #[error("Malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("Empty window: phase={0}, end is not after start")]
    EmptyWindow(String),

    #[error("Inconsistent capacity: phase={phase}, available={available}, total={total}")]
    InconsistentCapacity {
        phase: String,
        available: i64,
        total: i64,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<serde_json::Error> for EventGateError {
    fn from(err: serde_json::Error) -> Self {
        EventGateError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for EventGateError {
    fn from(err: std::io::Error) -> Self {
        EventGateError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EventGateError>;
