use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::weather_store::{weather_store::WeatherStore, weather_store_error::WeatherStoreError};

pub const LAST_WEATHER_FILE: &str = "last_weather.json";

pub struct FileWeatherStore {
    path: PathBuf,
}

impl FileWeatherStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(LAST_WEATHER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WeatherStore for FileWeatherStore {
    async fn read_last(&self) -> Result<Value, WeatherStoreError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => WeatherStoreError::NotFound,
            _ => WeatherStoreError::Io(e),
        })?;

        Ok(serde_json::from_slice(&raw)?)
    }

    async fn write_last(&self, document: Value) -> Result<(), WeatherStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_vec_pretty(&document)?;

        // One staging file per write: concurrent writers must not rename each
        // other's file away. The last rename wins.
        let staging = self
            .path
            .with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));

        let written = match tokio::fs::write(&staging, contents).await {
            Ok(()) => tokio::fs::rename(&staging, &self.path).await,
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(err.into());
        }

        debug!("Stored last weather in {}", self.path.display());
        Ok(())
    }
}
