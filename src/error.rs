pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Parsing errors
    #[error("{0}")]
    ParsingError(String),
    // Telegram client errors
    #[error("Failed to deliver reminder: {0}")]
    DeliveryError(#[from] reqwest::Error),
    // Store errors
    #[error("Subscription store I/O failed: {0}")]
    StoreIo(#[from] std::io::Error),
    #[error("Malformed subscription store data: {0}")]
    MalformedStore(#[from] serde_json::Error),
}
