use thiserror::Error;

use crate::core::features::{categorize_delay, encode_airport, DelayCategory, FeatureError};
use crate::core::model::{DelayRegressor, ModelError};

/// Required length of an IATA airport code
pub const AIRPORT_CODE_LEN: usize = 3;

/// Errors produced by the prediction pipeline
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The caller supplied an unusable airport code
    #[error("{0}")]
    InvalidRequest(String),

    /// Encoding or inference failed
    #[error("Prediction error: {0}")]
    Internal(String),

    /// The predictor cannot be built from the given model and bucket count
    #[error("Invalid model setup: {0}")]
    Startup(String),
}

impl From<FeatureError> for PredictionError {
    fn from(err: FeatureError) -> Self {
        PredictionError::Internal(err.to_string())
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::Internal(err.to_string())
    }
}

/// Result of a single delay prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub airport_code: String,
    pub predicted_delay_minutes: f64,
    pub delay_category: DelayCategory,
}

/// Prediction pipeline: validate, encode, infer, clamp, categorize
///
/// Holds the model read-only; cloning shares the model's weights.
#[derive(Debug, Clone)]
pub struct Predictor<M> {
    model: M,
    num_buckets: usize,
}

impl<M: DelayRegressor> Predictor<M> {
    /// Build a predictor, checking that every bucket the encoder can produce
    /// has a row in the model's embedding table.
    pub fn new(model: M, num_buckets: usize) -> Result<Self, PredictionError> {
        if num_buckets == 0 {
            return Err(PredictionError::Startup(
                "number of buckets must be at least 1".to_string(),
            ));
        }

        if num_buckets > model.vocab_size() {
            return Err(PredictionError::Startup(format!(
                "number of buckets ({}) exceeds the model vocabulary size ({})",
                num_buckets,
                model.vocab_size()
            )));
        }

        Ok(Self { model, num_buckets })
    }

    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predict the delay for an airport code
    ///
    /// The code is uppercased before hashing. Negative model estimates are
    /// clamped to zero and the result is rounded to two decimal places.
    pub fn predict(&self, airport_code: &str) -> Result<Prediction, PredictionError> {
        validate_airport_code(airport_code)?;

        let code = airport_code.to_uppercase();
        let bucket = encode_airport(&code, self.num_buckets)?;
        let raw_estimate = self.model.predict(bucket)?;

        let minutes = raw_estimate.max(0.0);
        let delay_category = categorize_delay(minutes);

        tracing::debug!(
            "Airport {} -> bucket {}, raw estimate {:.4}, category {:?}",
            code,
            bucket,
            raw_estimate,
            delay_category
        );

        Ok(Prediction {
            airport_code: code,
            predicted_delay_minutes: round_to_hundredths(minutes),
            delay_category,
        })
    }
}

/// Check that an airport code is present and exactly three characters long
pub fn validate_airport_code(code: &str) -> Result<(), PredictionError> {
    if code.is_empty() {
        return Err(PredictionError::InvalidRequest(
            "Invalid airport code. Must not be empty.".to_string(),
        ));
    }

    if code.chars().count() != AIRPORT_CODE_LEN {
        return Err(PredictionError::InvalidRequest(
            "Invalid airport code. Must be a 3-letter IATA code.".to_string(),
        ));
    }

    Ok(())
}

#[inline]
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
