//! Burn Rate Predictor Library
//!
//! Validates a six-field workplace survey, encodes it in training column
//! order, scores it with a pre-trained regressor and buckets the burn rate
//! into a risk level.

pub mod config;
pub mod feature_extractor;
pub mod handler;
pub mod logging;
pub mod models;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use feature_extractor::{FeatureExtractor, FeatureVector};
pub use handler::{InferenceFault, Outcome, PredictionService};
pub use models::{inference::InferenceEngine, BurnRateModel};
pub use types::{input::RawInput, prediction::PredictionResult, prediction::RiskLevel};
