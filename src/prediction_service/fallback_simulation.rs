use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::prediction_service::{
    prediction_service_request::PredictionServiceRequest,
    prediction_service_response::{FallbackPrediction, PredictionLocation},
};

pub const FALLBACK_MODEL_VERSION: &str = "sim-fallback-1.0.0";
pub const DEFAULT_PREDICTION_YEAR: i32 = 2025;

/// Closed-form placeholder used when the upstream model is unavailable.
/// Only the shape is stable; every value carries a random component.
pub fn simulate<R: Rng>(
    request: &PredictionServiceRequest,
    rng: &mut R,
    now: DateTime<Utc>,
) -> FallbackPrediction {
    let latitude = request.latitude.unwrap_or(0.0).to_radians();
    let longitude = request.longitude.unwrap_or(0.0).to_radians();

    let base_temp = 20.0 + latitude.sin() * 15.0;
    // A zero day or month disables its term, same as an absent one.
    let seasonal_variation = request
        .month
        .filter(|month| *month != 0)
        .map(|month| ((f64::from(month) - 1.0) * PI / 6.0).sin() * 10.0)
        .unwrap_or(0.0);
    let day_variation = request
        .day
        .filter(|day| *day != 0)
        .map(|day| (f64::from(day) * PI / 15.0).sin() * 5.0)
        .unwrap_or(0.0);

    let temp_max = round1(base_temp + seasonal_variation + day_variation + uniform(rng, 5.0));
    let temp_min = round1(temp_max - 8.0 - uniform(rng, 5.0));
    let precipitation = round1(latitude.sin().abs() * 20.0 + uniform(rng, 10.0));
    let wind_speed = round1(5.0 + uniform(rng, 15.0) + longitude.sin().abs() * 5.0);

    FallbackPrediction {
        temp_max,
        temp_min,
        precipitacion: precipitation,
        vel_viento: wind_speed,
        location: PredictionLocation {
            latitude: request.latitude,
            longitude: request.longitude,
            day: request.day,
            month: request.month,
            year: request.year.unwrap_or(DEFAULT_PREDICTION_YEAR),
        },
        prediction_date: now,
        model_version: FALLBACK_MODEL_VERSION,
    }
}

fn uniform<R: Rng>(rng: &mut R, upper: f64) -> f64 {
    rng.random::<f64>() * upper
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
