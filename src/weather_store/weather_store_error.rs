#[derive(Debug, thiserror::Error)]
pub enum WeatherStoreError {
    #[error("No weather has been stored yet")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored weather is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
