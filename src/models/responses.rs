use serde::{Deserialize, Serialize};
use crate::core::Prediction;

/// Response for the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "airportCode")]
    pub airport_code: String,
    #[serde(rename = "predictedDelayMinutes")]
    pub predicted_delay_minutes: f64,
    #[serde(rename = "delayCategory")]
    pub delay_category: u8,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            airport_code: prediction.airport_code,
            predicted_delay_minutes: prediction.predicted_delay_minutes,
            delay_category: prediction.delay_category.as_u8(),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
