use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::location_log::location_log_error::LocationLogError;

pub const DEFAULT_ADDRESS: &str = "address unavailable";
pub const DEFAULT_LOCATION_TYPE: &str = "user_selection";

/// A location picked in the UI, before it is logged.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInput {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub kind: Option<String>,
    pub date: Option<Value>,
}

impl TryFrom<&Value> for LocationInput {
    type Error = LocationLogError;

    /// `lat` and `lng` must be JSON numbers; everything else is optional.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let coordinate = |name: &str| {
            value
                .get(name)
                .filter(|v| v.is_number())
                .and_then(Value::as_f64)
                .ok_or(LocationLogError::InvalidCoordinates)
        };
        let text = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            lat: coordinate("lat")?,
            lng: coordinate("lng")?,
            address: text("address"),
            kind: text("type"),
            date: value.get("date").filter(|d| !d.is_null()).cloned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: Option<Value>,
}

impl LocationRecord {
    pub fn new(input: LocationInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            lat: input.lat,
            lng: input.lng,
            address: input.address.unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            kind: input
                .kind
                .unwrap_or_else(|| DEFAULT_LOCATION_TYPE.to_string()),
            date: input.date,
        }
    }
}
