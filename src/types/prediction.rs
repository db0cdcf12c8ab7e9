//! Prediction result and risk classification

use serde::Deserialize;
use std::fmt;

/// Qualitative burnout risk derived from the burn rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    Elevated,
    High,
}

impl RiskLevel {
    /// Bucket a score into a risk level.
    ///
    /// Intervals are half-open and checked from the bottom up, so a score
    /// exactly on a cut point belongs to the higher bucket.
    pub fn from_score(score: f64, thresholds: &RiskLevelThresholds) -> Self {
        if score < thresholds.medium {
            RiskLevel::Low
        } else if score < thresholds.elevated {
            RiskLevel::Medium
        } else if score < thresholds.high {
            RiskLevel::Elevated
        } else {
            RiskLevel::High
        }
    }

    /// Lowercase tag, also used as the CSS class of the result box
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::Elevated => "elevated",
            RiskLevel::High => "high",
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low burnout risk — maintain current balance.",
            RiskLevel::Medium => "Moderate risk — consider breaks or workload adjustments.",
            RiskLevel::Elevated => {
                "Elevated risk — actively monitor workload and provide support."
            }
            RiskLevel::High => "High risk — prioritize immediate intervention.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the medium, elevated and high buckets
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskLevelThresholds {
    pub medium: f64,
    pub elevated: f64,
    pub high: f64,
}

impl RiskLevelThresholds {
    /// Cut points must be finite and strictly increasing.
    pub fn is_valid(&self) -> bool {
        [self.medium, self.elevated, self.high]
            .iter()
            .all(|t| t.is_finite())
            && self.medium < self.elevated
            && self.elevated < self.high
    }
}

impl Default for RiskLevelThresholds {
    fn default() -> Self {
        Self {
            medium: 0.40,
            elevated: 0.60,
            high: 0.75,
        }
    }
}

/// Model output for one submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// Predicted burn rate, nominally 0.0 - 1.0
    pub burn_rate: f64,

    /// Risk bucket for the burn rate
    pub risk_level: RiskLevel,
}

impl PredictionResult {
    pub fn new(burn_rate: f64, thresholds: &RiskLevelThresholds) -> Self {
        Self {
            burn_rate,
            risk_level: RiskLevel::from_score(burn_rate, thresholds),
        }
    }

    /// Score rounded to two decimals, e.g. `"0.42"`
    pub fn score_text(&self) -> String {
        format!("{:.2}", self.burn_rate)
    }

    /// Headline shown above the advisory
    pub fn prediction_text(&self) -> String {
        format!("Predicted Burn Rate: {}", self.score_text())
    }

    pub fn advisory(&self) -> &'static str {
        self.risk_level.advisory()
    }
}
