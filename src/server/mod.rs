//! HTTP surface: the form page and the prediction endpoint

pub mod view;

pub use view::{FormTemplate, FormView};

use crate::handler::{InferenceFault, Outcome, PredictionService};
use crate::types::input::RawInput;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use std::sync::Arc;
use tracing::{debug, error};

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    service: PredictionService,
    template: Arc<FormTemplate>,
    strict_status_codes: bool,
}

impl AppState {
    pub fn new(service: PredictionService, template: FormTemplate) -> Self {
        Self {
            service,
            template: Arc::new(template),
            strict_status_codes: false,
        }
    }

    /// Use 400 for validation errors and 500 for faults
    pub fn with_strict_status_codes(mut self, strict: bool) -> Self {
        self.strict_status_codes = strict;
        self
    }

    fn status_for(&self, outcome: &Outcome) -> StatusCode {
        if !self.strict_status_codes {
            return StatusCode::OK;
        }
        match outcome {
            Outcome::Prediction(_) => StatusCode::OK,
            Outcome::Invalid(_) => StatusCode::BAD_REQUEST,
            Outcome::Fault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn page(&self, status: StatusCode, view: &FormView) -> Response {
        match self.template.render(view) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to render form page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .with_state(state)
}

/// `GET /`: blank form
pub async fn home(State(state): State<AppState>) -> Response {
    state.page(StatusCode::OK, &FormView::empty())
}

/// `POST /predict`: validate, infer, and re-render the form with the result
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    // A body that cannot be decoded is treated as an empty submission
    let raw = match form {
        Ok(Form(pairs)) => RawInput::from_pairs(pairs),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable form body");
            RawInput::default()
        }
    };

    let service = state.service.clone();
    let submitted = raw.clone();

    // Model evaluation is blocking CPU work
    let outcome = match tokio::task::spawn_blocking(move || service.predict(&submitted)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Prediction task failed");
            let fault = if e.is_panic() {
                InferenceFault::from_panic(e.into_panic())
            } else {
                InferenceFault::TaskFailed(e.to_string())
            };
            Outcome::Fault(fault)
        }
    };

    let status = state.status_for(&outcome);
    state.page(status, &FormView::from_outcome(raw, &outcome))
}
