use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sink error: {0}")]
    Serialization(#[from] serde_json::Error)
}
