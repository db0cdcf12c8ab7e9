//! Feature extraction for burn rate model inference.
//!
//! The model was trained on a six-column frame; features must be produced in
//! that exact column order or predictions are silently wrong.

use crate::types::input::{Category, ValidatedInput};

/// Number of model input features
pub const FEATURE_COUNT: usize = 6;

/// Training column names, in model input order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Gender",
    "Company Type",
    "WFH Setup Available",
    "Designation",
    "Resource Allocation",
    "Mental Fatigue Score",
];

/// Fixed-order model input row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }
}

/// Transforms validated form input into model input features.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a validated submission.
    ///
    /// Categoricals are label-encoded; order follows [`FEATURE_NAMES`].
    pub fn extract(&self, input: &ValidatedInput) -> FeatureVector {
        FeatureVector([
            input.gender.code(),
            input.company_type.code(),
            input.wfh_setup.code(),
            input.designation as f32,
            input.resource_allocation as f32,
            input.mental_fatigue as f32,
        ])
    }
}
