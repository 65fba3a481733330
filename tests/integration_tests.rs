// Integration tests for Flight Delay API

use actix_web::{http::StatusCode, test, web, App};
use flight_delay_api::core::{
    DelayModelConfig, DelayRegressor, InferenceBackend, ModelError, Predictor, ServiceModel,
    DEFAULT_NUM_BUCKETS,
};
use flight_delay_api::routes::{self, predict::AppState};
use serde_json::{json, Value};

fn service_state() -> AppState<ServiceModel> {
    let model = DelayModelConfig::new()
        .build::<InferenceBackend>(None, &Default::default())
        .unwrap();
    AppState::new(Predictor::new(model, DEFAULT_NUM_BUCKETS).unwrap())
}

/// Model stub that always fails inference
struct BrokenModel;

impl DelayRegressor for BrokenModel {
    fn vocab_size(&self) -> usize {
        347
    }

    fn predict(&self, _bucket: usize) -> Result<f64, ModelError> {
        Err(ModelError::NonFinite(f64::NAN))
    }
}

macro_rules! init_app {
    ($state:expr, $model:ty) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(routes::json_config())
                .configure(routes::configure_routes::<$model>),
        )
        .await
    };
}

#[actix_web::test]
async fn test_predict_valid_airport() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": "JFK" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["airportCode"], "JFK");
    let delay = body["predictedDelayMinutes"].as_f64().unwrap();
    assert!(delay >= 0.0);
    let category = body["delayCategory"].as_u64().unwrap();
    assert!(category <= 2);
}

#[actix_web::test]
async fn test_predict_normalizes_lowercase_code() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": "lax" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["airportCode"], "LAX");
}

#[actix_web::test]
async fn test_predict_multiple_airports() {
    let app = init_app!(service_state(), ServiceModel);

    for airport in ["JFK", "LAX", "ORD", "DFW", "ATL"] {
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(json!({ "airportCode": airport }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["airportCode"], airport);
        assert!(body["predictedDelayMinutes"].as_f64().unwrap() >= 0.0);
        assert!(body["delayCategory"].as_u64().unwrap() <= 2);
    }
}

#[actix_web::test]
async fn test_predict_same_code_same_answer() {
    let app = init_app!(service_state(), ServiceModel);

    let mut answers = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/predict")
            .set_json(json!({ "airportCode": "ORD" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        answers.push(body);
    }

    assert_eq!(answers[0], answers[1]);
}

#[actix_web::test]
async fn test_predict_rejects_short_code() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": "J" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 400);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("3-letter IATA code"), "unexpected message: {}", message);
}

#[actix_web::test]
async fn test_predict_rejects_empty_code() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Must not be empty"), "unexpected message: {}", message);
}

#[actix_web::test]
async fn test_predict_rejects_non_string_code() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": 123 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_predict_model_failure_is_internal_error() {
    let state = AppState::new(Predictor::new(BrokenModel, DEFAULT_NUM_BUCKETS).unwrap());
    let app = init_app!(state, BrokenModel);

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "airportCode": "JFK" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Prediction error: "), "unexpected message: {}", message);
}

#[actix_web::test]
async fn test_health_check() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({ "status": "healthy" }));
}

#[actix_web::test]
async fn test_root_metadata() {
    let app = init_app!(service_state(), ServiceModel);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({ "message": "Flight Delay Prediction API", "status": "running" }));
}

#[::core::prelude::v1::test]
fn test_startup_rejects_buckets_above_vocab() {
    let model: ServiceModel = DelayModelConfig::new()
        .with_vocab_size(50)
        .build(None, &Default::default())
        .unwrap();

    assert!(Predictor::new(model, DEFAULT_NUM_BUCKETS).is_err());
}
