//! ONNX-backed burn rate inference engine

use crate::config::ModelConfig;
use crate::feature_extractor::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::models::loader::{LoadedModel, ModelLoader};
use crate::models::BurnRateModel;
use anyhow::{Context, Result};
use ort::value::Tensor;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Regressor backed by a single ONNX Runtime session.
///
/// Running a session needs exclusive access, so calls are serialized behind
/// a mutex. The engine is built once at startup and shared for the process
/// lifetime.
pub struct InferenceEngine {
    model: Mutex<LoadedModel>,
}

impl InferenceEngine {
    /// Load the model named in configuration
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.onnx_threads)?;
        let model = loader.load_model(&config.path)?;

        info!(
            path = %config.path.display(),
            features = ?FEATURE_NAMES,
            "Inference engine initialized"
        );

        Ok(Self::from_loaded(model))
    }

    pub fn from_loaded(model: LoadedModel) -> Self {
        Self {
            model: Mutex::new(model),
        }
    }

    /// Run the session on one feature row
    fn run(model: &mut LoadedModel, features: &FeatureVector) -> Result<f64> {
        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = model
            .session
            .run(ort::inputs![&model.input_name => input_tensor])
            .context("Model run failed")?;

        let output = match outputs.get(model.output_name.as_str()) {
            Some(output) => output,
            None => anyhow::bail!("Model produced no output named {}", model.output_name),
        };

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .context("Model output is not a float tensor")?;

        debug!(output = %model.output_name, shape = ?shape, "Extracted regression output");

        Self::extract_score(data)
    }

    /// Regressors emit `[batch, 1]` or `[batch]`; with a batch of one the
    /// score is the first element either way.
    fn extract_score(data: &[f32]) -> Result<f64> {
        data.first()
            .map(|&v| v as f64)
            .context("Model returned an empty output tensor")
    }
}

impl BurnRateModel for InferenceEngine {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let mut guard = lock_session(&self.model);
        Self::run(&mut guard, features)
    }
}

/// Take the session lock even if an earlier call panicked while holding it.
///
/// A failed run leaves no partial state in the session, so the next request
/// can use it as is.
fn lock_session<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
        warn!("Inference lock was poisoned by a panic; recovering");
        mutex.clear_poison();
        poisoned.into_inner()
    })
}
