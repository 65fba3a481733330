//! Flight Delay API - delay prediction service for airport codes
//!
//! Hashes an IATA airport code into a bucket, runs it through a small
//! embedding + MLP network and reports the estimated delay in minutes
//! together with a coarse delay category.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{categorize_delay, encode_airport, DelayCategory, DelayModel, DelayModelConfig, Prediction, PredictionError, Predictor};
pub use models::{PredictRequest, PredictResponse};
