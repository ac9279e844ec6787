use async_trait::async_trait;
use serde_json::Value;

use crate::weather_store::weather_store_error::WeatherStoreError;

/// Keeps exactly one document: the last prediction shown to the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherStore: Send + Sync {
    async fn read_last(&self) -> Result<Value, WeatherStoreError>;

    async fn write_last(&self, document: Value) -> Result<(), WeatherStoreError>;
}
