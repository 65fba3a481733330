//! Delay regression network
//!
//! A small feed-forward network that maps an airport bucket index to a
//! delay estimate in minutes:
//! embedding -> flatten -> dense(64, relu) -> dense(32, relu) -> dense(1).

use burn::nn::{Embedding, EmbeddingConfig, Linear, LinearConfig, Relu};
use burn::prelude::*;
use burn::tensor::ElementConversion;
use thiserror::Error;

/// CPU backend used by the service
pub type InferenceBackend = burn::backend::NdArray;

/// Model as served over HTTP
pub type ServiceModel = DelayModel<InferenceBackend>;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("bucket index {bucket} is outside the embedding vocabulary (size {vocab_size})")]
    BucketOutOfRange { bucket: usize, vocab_size: usize },

    #[error("model produced a non-finite estimate: {0}")]
    NonFinite(f64),
}

/// Anything that turns a bucket index into a raw delay estimate
pub trait DelayRegressor {
    /// Number of distinct bucket indices the regressor accepts
    fn vocab_size(&self) -> usize;

    /// Raw delay estimate in minutes; may be negative
    fn predict(&self, bucket: usize) -> Result<f64, ModelError>;
}

/// Delay model configuration
#[derive(Config, Debug)]
pub struct DelayModelConfig {
    /// Rows in the airport embedding table
    #[config(default = "347")]
    pub vocab_size: usize,
    /// Width of each embedding vector
    #[config(default = "32")]
    pub embedding_dim: usize,
    #[config(default = "64")]
    pub hidden_dim: usize,
    #[config(default = "32")]
    pub second_hidden_dim: usize,
}

/// Embedding followed by a small MLP head
#[derive(Module, Debug)]
pub struct DelayModel<B: Backend> {
    airport_embedding: Embedding<B>,
    dense1: Linear<B>,
    dense2: Linear<B>,
    output: Linear<B>,
    activation: Relu,
    vocab_size: usize,
}

impl DelayModelConfig {
    /// Initialize the network with fresh random weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> DelayModel<B> {
        let airport_embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let dense1 = LinearConfig::new(self.embedding_dim, self.hidden_dim).init(device);
        let dense2 = LinearConfig::new(self.hidden_dim, self.second_hidden_dim).init(device);
        let output = LinearConfig::new(self.second_hidden_dim, 1).init(device);

        DelayModel {
            airport_embedding,
            dense1,
            dense2,
            output,
            activation: Relu::new(),
            vocab_size: self.vocab_size,
        }
    }

    /// Initialize the network and run one warm-up pass so every weight is
    /// materialized before the model is shared.
    ///
    /// With a seed, the backend RNG is reseeded first and the weights are
    /// reproducible across restarts. The seed is process-global: reseeding
    /// affects every model of this backend built afterwards in the process.
    pub fn build<B: Backend>(
        &self,
        seed: Option<u64>,
        device: &B::Device,
    ) -> Result<DelayModel<B>, ModelError> {
        if let Some(seed) = seed {
            B::seed(seed);
        }

        let model = self.init(device);
        let warm_up = model.predict(0)?;
        tracing::debug!("Model warm-up estimate for bucket 0: {:.4}", warm_up);

        Ok(model)
    }
}

impl<B: Backend> DelayModel<B> {
    /// Forward pass: `[batch, 1]` bucket indices to `[batch, 1]` estimates
    pub fn forward(&self, buckets: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.airport_embedding.forward(buckets); // [batch, 1, embedding_dim]
        let x: Tensor<B, 2> = x.flatten(1, 2);
        let x = self.activation.forward(self.dense1.forward(x));
        let x = self.activation.forward(self.dense2.forward(x));
        self.output.forward(x)
    }
}

impl<B: Backend> DelayRegressor for DelayModel<B> {
    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn predict(&self, bucket: usize) -> Result<f64, ModelError> {
        if bucket >= self.vocab_size {
            return Err(ModelError::BucketOutOfRange {
                bucket,
                vocab_size: self.vocab_size,
            });
        }

        let device = self.airport_embedding.weight.device();
        let input = Tensor::<B, 1, Int>::from_ints([bucket as i32].as_slice(), &device)
            .unsqueeze::<2>();

        let estimate: f64 = self.forward(input).into_scalar().elem();
        if !estimate.is_finite() {
            return Err(ModelError::NonFinite(estimate));
        }

        Ok(estimate)
    }
}
