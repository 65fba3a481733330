// Core prediction exports
pub mod features;
pub mod model;
pub mod predictor;

pub use features::{categorize_delay, encode_airport, DelayCategory, FeatureError, DEFAULT_NUM_BUCKETS};
pub use model::{DelayModel, DelayModelConfig, DelayRegressor, InferenceBackend, ModelError, ServiceModel};
pub use predictor::{validate_airport_code, Prediction, PredictionError, Predictor};
