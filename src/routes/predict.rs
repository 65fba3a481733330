use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{DelayRegressor, PredictionError, Predictor, ServiceModel};
use crate::models::{ErrorResponse, HealthResponse, PredictRequest, PredictResponse, RootResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<M = ServiceModel> {
    pub predictor: Predictor<M>,
}

impl<M> AppState<M> {
    pub fn new(predictor: Predictor<M>) -> Self {
        Self { predictor }
    }
}

/// Configure prediction routes
pub fn configure<M: DelayRegressor + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict::<M>));
}

/// Service metadata endpoint
async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: "Flight Delay Prediction API".to_string(),
        status: "running".to_string(),
    })
}

/// Liveness check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Predict delay endpoint
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "airportCode": "JFK"
/// }
/// ```
async fn predict<M: DelayRegressor + 'static>(
    state: web::Data<AppState<M>>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for airport code {:?}: {}", req.airport_code, errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.predictor.predict(&req.airport_code) {
        Ok(prediction) => {
            tracing::info!(
                "Predicted {:.2} minutes (category {}) for {}",
                prediction.predicted_delay_minutes,
                prediction.delay_category.as_u8(),
                prediction.airport_code
            );
            HttpResponse::Ok().json(PredictResponse::from(prediction))
        }
        Err(PredictionError::InvalidRequest(message)) => {
            tracing::info!("Rejected airport code {:?}: {}", req.airport_code, message);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid request".to_string(),
                message,
                status_code: 400,
            })
        }
        Err(e) => {
            tracing::error!("Prediction failed for {:?}: {}", req.airport_code, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Prediction failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
