//! ML model inference components

pub mod inference;
pub mod loader;

pub use inference::InferenceEngine;
pub use loader::ModelLoader;

use crate::feature_extractor::FeatureVector;
use anyhow::Result;

/// A trained burn rate regressor.
///
/// The handler only needs a score for a feature vector; any model format
/// (ONNX session, test stub, closure) can sit behind this. Implementations
/// are shared across requests and must tolerate concurrent calls.
pub trait BurnRateModel: Send + Sync {
    /// Predict the burn rate for one feature row.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

impl<F> BurnRateModel for F
where
    F: Fn(&FeatureVector) -> Result<f64> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        self(features)
    }
}
