//! HTML rendering of the input form

use crate::handler::Outcome;
use crate::types::input::{Category, CompanyType, Gender, RawInput, WfhSetup};
use crate::types::prediction::RiskLevel;
use minijinja::{context, Environment};

const TEMPLATE_NAME: &str = "index.html";

/// Everything the page shows for one response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormView {
    /// Values echoed back into the form
    pub raw: RawInput,
    /// Score headline, joined validation errors, or fault text
    pub prediction_text: Option<String>,
    /// Advisory for a successful prediction
    pub suggestion_text: Option<String>,
    /// Styling tag for a successful prediction
    pub risk_level: Option<RiskLevel>,
}

impl FormView {
    /// Blank form
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_outcome(raw: RawInput, outcome: &Outcome) -> Self {
        let prediction = outcome.prediction();
        Self {
            raw,
            prediction_text: Some(outcome.message()),
            suggestion_text: prediction.map(|p| p.advisory().to_string()),
            risk_level: prediction.map(|p| p.risk_level),
        }
    }
}

/// The form page template, compiled once at startup.
///
/// The template name ends in `.html`, so every interpolated value is
/// HTML-escaped by the environment.
pub struct FormTemplate {
    env: Environment<'static>,
}

impl FormTemplate {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &FormView) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let raw = &view.raw;

        // Absent values are passed as empty strings; `none` would print
        template.render(context!(
            genders => Gender::LABELS,
            company_types => CompanyType::LABELS,
            wfh_options => WfhSetup::LABELS,
            gender => raw.gender,
            company_type => raw.company_type,
            wfh_setup => raw.wfh_setup,
            designation => raw.designation,
            resource_allocation => raw.resource_allocation,
            mental_fatigue => raw.mental_fatigue,
            prediction_text => view.prediction_text.as_deref().unwrap_or_default(),
            suggestion_text => view.suggestion_text.as_deref().unwrap_or_default(),
            risk_level => view.risk_level.map(|r| r.as_str()).unwrap_or_default(),
        ))
    }
}
