use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    pub year: i32,
}

/// Locally simulated prediction, tagged with its own `model_version`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackPrediction {
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitacion: f64,
    pub vel_viento: f64,
    pub location: PredictionLocation,
    pub prediction_date: DateTime<Utc>,
    pub model_version: &'static str,
}

/// Serialized without a wrapper: callers only tell the two apart through
/// `model_version`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionServiceResponse {
    Upstream(Value),
    Fallback(FallbackPrediction),
}

impl PredictionServiceResponse {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PredictionServiceResponse::Fallback(_))
    }
}
