//! Inference request handling: raw form values in, explicit outcome out.

use crate::feature_extractor::FeatureExtractor;
use crate::models::BurnRateModel;
use crate::types::input::{RawInput, ValidatedInput, ValidationErrors};
use crate::types::prediction::{PredictionResult, RiskLevelThresholds};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Unexpected failure between validation and a finished prediction
#[derive(Debug, Error)]
pub enum InferenceFault {
    #[error("{0:#}")]
    Model(anyhow::Error),

    #[error("model returned a non-finite score ({0})")]
    NonFiniteScore(f64),

    #[error("model panicked: {0}")]
    Panicked(String),

    #[error("prediction task did not complete: {0}")]
    TaskFailed(String),
}

impl InferenceFault {
    /// Build a fault from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        InferenceFault::Panicked(message)
    }
}

/// Result of handling one submission
#[derive(Debug)]
pub enum Outcome {
    /// Model ran and the score was bucketed
    Prediction(PredictionResult),
    /// One or more fields failed validation; the model was not called
    Invalid(ValidationErrors),
    /// Validation passed but inference failed
    Fault(InferenceFault),
}

impl Outcome {
    /// Text for the message line of the form
    pub fn message(&self) -> String {
        match self {
            Outcome::Prediction(result) => result.prediction_text(),
            Outcome::Invalid(errors) => errors.joined(),
            Outcome::Fault(fault) => format!("Error: {}", fault),
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Outcome::Prediction(result) => Some(result),
            _ => None,
        }
    }
}

/// Validates submissions and runs them through the model.
///
/// Holds only immutable, process-wide state, so one instance is cloned into
/// every request.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn BurnRateModel>,
    extractor: FeatureExtractor,
    thresholds: RiskLevelThresholds,
}

impl PredictionService {
    pub fn new(model: Arc<dyn BurnRateModel>, thresholds: RiskLevelThresholds) -> Self {
        Self {
            model,
            extractor: FeatureExtractor::new(),
            thresholds,
        }
    }

    /// Handle one form submission. Never panics on model failure.
    pub fn predict(&self, raw: &RawInput) -> Outcome {
        let input = match raw.validate() {
            Ok(input) => input,
            Err(errors) => {
                debug!(errors = %errors, "Submission failed validation");
                return Outcome::Invalid(errors);
            }
        };

        match self.infer(&input) {
            Ok(result) => {
                debug!(
                    burn_rate = result.burn_rate,
                    risk_level = %result.risk_level,
                    "Prediction complete"
                );
                Outcome::Prediction(result)
            }
            Err(fault) => {
                error!(error = %fault, "Inference failed");
                Outcome::Fault(fault)
            }
        }
    }

    fn infer(&self, input: &ValidatedInput) -> Result<PredictionResult, InferenceFault> {
        let features = self.extractor.extract(input);
        debug!(features = ?features.as_slice(), "Extracted features");

        let score = panic::catch_unwind(AssertUnwindSafe(|| self.model.predict(&features)))
            .map_err(InferenceFault::from_panic)?
            .map_err(InferenceFault::Model)?;

        if !score.is_finite() {
            return Err(InferenceFault::NonFiniteScore(score));
        }

        Ok(PredictionResult::new(score, &self.thresholds))
    }
}
