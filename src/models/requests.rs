use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::core::validate_airport_code;

/// Request to predict the delay at an airport
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(custom(function = "validate_code"))]
    #[serde(alias = "airport_code", rename = "airportCode")]
    pub airport_code: String,
}

/// Apply the predictor's airport code rules at the request edge
fn validate_code(code: &str) -> Result<(), ValidationError> {
    validate_airport_code(code)
        .map_err(|e| ValidationError::new("airport_code").with_message(e.to_string().into()))
}
