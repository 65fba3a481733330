use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use flight_delay_api::config::{LoggingSettings, Settings};
use flight_delay_api::core::{DelayRegressor, InferenceBackend, Predictor, ServiceModel};
use flight_delay_api::routes::{self, predict::AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Configuration error: {}", e))
    })?;

    init_logging(&settings.logging);

    info!("Starting Flight Delay Prediction API...");
    info!("Configuration loaded successfully");

    // Build the model once; every worker shares these weights read-only
    let device = Default::default();
    let model: ServiceModel = settings
        .model
        .model_config()
        .build::<InferenceBackend>(settings.model.seed, &device)
        .map_err(|e| {
            error!("Failed to initialize delay model: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, format!("Model error: {}", e))
        })?;

    let predictor = Predictor::new(model, settings.model.num_buckets).map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!(
        "Delay model initialized (vocab: {}, embedding: {}, buckets: {}, seeded: {})",
        predictor.model().vocab_size(),
        settings.model.embedding_dim,
        predictor.num_buckets(),
        settings.model.seed.is_some()
    );

    let app_state = AppState::new(predictor);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{} with {} workers", host, port, workers);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes::<ServiceModel>)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
