//! End-to-end tests of the HTTP surface with stub models

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use burn_rate_predictor::feature_extractor::FeatureVector;
use burn_rate_predictor::handler::PredictionService;
use burn_rate_predictor::server::{router, AppState, FormTemplate};
use burn_rate_predictor::types::prediction::RiskLevelThresholds;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const VALID_FORM: &str = "gender=Male&company_type=Service&wfh_setup=Yes\
                          &mental_fatigue=5&resource_allocation=3&designation=2";

fn app<F>(model: F) -> Router
where
    F: Fn(&FeatureVector) -> anyhow::Result<f64> + Send + Sync + 'static,
{
    app_with_state(model, false)
}

fn app_with_state<F>(model: F, strict: bool) -> Router
where
    F: Fn(&FeatureVector) -> anyhow::Result<f64> + Send + Sync + 'static,
{
    let service = PredictionService::new(Arc::new(model), RiskLevelThresholds::default());
    let template = FormTemplate::new().unwrap();
    router(AppState::new(service, template).with_strict_status_codes(strict))
}

async fn post_form(app: Router, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_renders_empty_form() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app(|_| Ok(0.5)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("action=\"/predict\""));
    assert!(!html.contains("Predicted Burn Rate"));
}

#[tokio::test]
async fn test_valid_submission_renders_prediction() {
    let (status, html) = post_form(app(|_| Ok(0.42)), VALID_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Predicted Burn Rate: 0.42"));
    assert!(html.contains("<div class=\"result medium\">"));
    assert!(html.contains("Moderate risk — consider breaks or workload adjustments."));
}

#[tokio::test]
async fn test_field_order_does_not_change_features() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let captured = seen.clone();
    let app = app(move |features: &FeatureVector| {
        captured.lock().unwrap().push(features.to_vec());
        Ok(0.3)
    });

    post_form(app.clone(), VALID_FORM).await;
    post_form(
        app,
        "designation=2&resource_allocation=3&mental_fatigue=5\
         &wfh_setup=Yes&company_type=Service&gender=Male",
    )
    .await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], vec![1.0, 1.0, 1.0, 2.0, 3.0, 5.0]);
    assert_eq!(seen[0], seen[1]);
}

#[tokio::test]
async fn test_invalid_gender_shows_message_without_score() {
    let body = VALID_FORM.replace("gender=Male", "gender=Other");

    let (status, html) = post_form(app(|_| Ok(0.42)), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Select a valid Gender."));
    assert!(!html.contains("Predicted Burn Rate"));
    assert!(!html.contains("class=\"suggestion\""));
}

#[tokio::test]
async fn test_all_errors_joined_in_order() {
    let body = "gender=&company_type=Startup&wfh_setup=Maybe\
                &mental_fatigue=abc&resource_allocation=0&designation=9";

    let (_, html) = post_form(app(|_| Ok(0.5)), body).await;

    assert!(html.contains(
        "Select a valid Gender. | Select a valid Company Type. | Select a valid WFH option. | \
         Mental Fatigue must be a number. | Resource Allocation must be 1–10. | \
         Designation must be 1–5."
    ));
}

#[tokio::test]
async fn test_missing_fields_are_validation_errors() {
    let (status, html) = post_form(app(|_| Ok(0.5)), "gender=Female").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("Select a valid Gender."));
    assert!(html.contains("Select a valid Company Type."));
    assert!(html.contains("Designation must be a number."));
}

#[tokio::test]
async fn test_boundary_values_accepted() {
    for body in [
        "gender=Female&company_type=Product&wfh_setup=No&mental_fatigue=0&resource_allocation=1&designation=1",
        "gender=Female&company_type=Product&wfh_setup=No&mental_fatigue=10&resource_allocation=10&designation=5",
    ] {
        let (_, html) = post_form(app(|_| Ok(0.2)), body).await;
        assert!(html.contains("Predicted Burn Rate: 0.20"), "{body}");
        assert!(html.contains("<div class=\"result low\">"));
    }
}

#[tokio::test]
async fn test_model_error_rendered_with_inputs() {
    let (status, html) = post_form(
        app(|_| Err(anyhow::anyhow!("booster failed to evaluate"))),
        VALID_FORM,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error: booster failed to evaluate"));
    assert!(html.contains("<option value=\"Male\" selected>Male</option>"));
    assert!(html.contains("name=\"mental_fatigue\" min=\"0\" max=\"10\" step=\"any\" value=\"5\""));
    assert!(html.contains("name=\"designation\" min=\"1\" max=\"5\" step=\"any\" value=\"2\""));
}

#[tokio::test]
async fn test_model_panic_rendered_as_error() {
    let (status, html) = post_form(app(|_| panic!("tree index out of bounds")), VALID_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error:"));
    assert!(html.contains("tree index out of bounds"));
}

#[tokio::test]
async fn test_strict_status_codes() {
    let body = VALID_FORM.replace("designation=2", "designation=7");
    let (status, html) = post_form(app_with_state(|_| Ok(0.5), true), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Designation must be 1–5."));

    let (status, _) = post_form(
        app_with_state(|_| Err(anyhow::anyhow!("boom")), true),
        VALID_FORM,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = post_form(app_with_state(|_| Ok(0.9), true), VALID_FORM).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_key_uses_first_value() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let captured = seen.clone();
    let app = app(move |features: &FeatureVector| {
        captured.lock().unwrap().push(features.to_vec());
        Ok(0.42)
    });

    let body = format!("{VALID_FORM}&gender=Female&designation=9");
    let (status, html) = post_form(app, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Predicted Burn Rate: 0.42"));
    assert!(html.contains("<option value=\"Male\" selected>Male</option>"));
    assert_eq!(seen.lock().unwrap()[0], vec![1.0, 1.0, 1.0, 2.0, 3.0, 5.0]);
}

#[tokio::test]
async fn test_missing_content_type_is_empty_submission() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(VALID_FORM))
        .unwrap();

    let (status, html) = send(app(|_| Ok(0.5)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Select a valid Gender. | Select a valid Company Type."));
    assert!(!html.contains("Predicted Burn Rate"));
}

#[tokio::test]
async fn test_multipart_body_is_empty_submission() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=X")
        .body(Body::from("--X\r\nContent-Disposition: form-data; name=\"gender\"\r\n\r\nMale\r\n--X--\r\n"))
        .unwrap();

    let (status, html) = send(app(|_| Ok(0.5)), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Designation must be a number."));
}
