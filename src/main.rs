mod handlers;
mod middlewares;
mod models;
mod routes;
mod services;
mod state;
mod structs;
mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::services::theme_generator::GeminiThemeClient;
use crate::state::app_state::AppState;
use crate::utils::config::AppConfig;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use routes::init_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let theme_client = match GeminiThemeClient::new(&config.theme) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating the theme client: {:#}", e);
            std::process::exit(1);
        }
    };
    if config.theme.api_key.is_none() {
        warn!("THEME_API_KEY not set, AI theme generation is disabled");
    }

    // Create shared state
    let app_state = web::Data::new(AppState::with_session_ttl(
        Arc::new(theme_client),
        Duration::from_secs(config.session_ttl_secs),
    ));
    let allowed_origins = config.allowed_origins.clone();

    info!(
        "Starting QR generator on {}:{}",
        config.bind_address, config.port
    );

    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_header(http::header::ACCEPT)
            .allowed_header(http::header::CONTENT_TYPE)
            .expose_headers(vec![http::header::CONTENT_DISPOSITION])
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
