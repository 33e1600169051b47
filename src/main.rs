mod web;

use std::sync::Arc;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use boavila::client::{ClientFactory, MemoryCatalog, SupabaseConnector};
use boavila::config::{AppConfig, Backend};

use crate::web::middleware::SecurityHeaders;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let clients: Arc<dyn ClientFactory> = match (&config.backend, config.supabase.clone()) {
        (Backend::Memory { email, password }, _) => {
            log::warn!("Using the in-memory catalog; products are lost on restart");
            Arc::new(MemoryCatalog::new(email.clone(), password.clone(), Vec::new()))
        }
        (Backend::Supabase, Some(supabase)) => {
            log::info!("Using Supabase project at {}", supabase.url);
            Arc::new(SupabaseConnector::new(supabase))
        }
        (Backend::Supabase, None) => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "SUPABASE_URL and SUPABASE_ANON_KEY are required",
            ));
        }
    };

    let state = Data::new(web::AppState::new(clients, config.cookie_secure));
    let static_dir = config.static_dir.clone();

    log::info!("Listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(SecurityHeaders)
            .app_data(state.clone())
            .configure(web::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
