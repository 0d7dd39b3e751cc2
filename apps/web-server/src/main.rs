//! # Quill Web Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod flash;
mod forms;
mod handlers;
mod middleware;
mod render;
mod state;
mod telemetry;

use config::AppConfig;
use quill_core::ports::{PasswordService, SessionService};
use quill_infra::{Argon2PasswordService, JwtSessionService};
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill web server on {}:{}",
        config.host,
        config.port
    );

    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let sessions: Arc<dyn SessionService> = Arc::new(JwtSessionService::from_env());

    let state = AppState::new(&config, passwords.as_ref())
        .await
        .context("Failed to build application state")?;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(passwords.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .context("Failed to bind listener")?
    .run()
    .await?;

    Ok(())
}
