use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use log::info;

use akinator_server::llm::openai::OpenAiGenerator;
use akinator_server::middleware::cors_middleware;
use akinator_server::routes::configure_routes;
use akinator_server::{AppConfig, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env()?;
    let generator = OpenAiGenerator::new(&config.openai)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!("Using model {} at {}", config.openai.model, config.openai.base_url);
    info!("Starting Akinator server at http://{}", config.bind_addr);

    // Create shared application state
    let app_state = web::Data::new(AppState::new(Arc::new(generator), config.max_questions));
    let allowed_origins = config.allowed_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&allowed_origins))
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
