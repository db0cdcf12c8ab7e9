//! Type definitions for the burn rate predictor

pub mod input;
pub mod prediction;

pub use input::{
    Category, CompanyType, FieldError, Gender, RawInput, ValidatedInput, ValidationErrors,
    WfhSetup,
};
pub use prediction::{PredictionResult, RiskLevel, RiskLevelThresholds};
