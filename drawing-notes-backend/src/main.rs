use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod catalog;
mod compose;
mod config;
mod controllers;
mod leads;
mod placeholder;
mod selection;
mod views;

use catalog::{Catalog, CategoryOrder};
use config::Config;
use leads::{LeadSink, NotionLeadClient};
use selection::SessionStore;

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub struct AppState {
    /// Read-only for the life of the process
    pub catalog: Arc<Catalog>,
    pub category_order: Arc<CategoryOrder>,
    pub sessions: Arc<SessionStore>,
    pub leads: Arc<dyn LeadSink>,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!("Drawing Notes Generator v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match catalog::loader::load_catalog(&config.notes_csv_path) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            log::error!("Failed to load note catalog: {}", e);
            std::process::exit(1);
        }
    };

    let category_order = match CategoryOrder::load(&config.category_order_path) {
        Ok(o) => Arc::new(o),
        Err(e) => {
            log::error!("Failed to load category order: {}", e);
            std::process::exit(1);
        }
    };

    let leads: Arc<dyn LeadSink> = Arc::new(NotionLeadClient::new(&config.leads));
    if leads.is_configured() {
        log::info!("Lead capture enabled ({})", config.leads.api_base);
    } else {
        log::warn!("Lead capture disabled - set NOTION_TOKEN and NOTION_DATABASE_ID to enable");
    }

    let sessions = Arc::new(SessionStore::new(config.session_ttl, config.max_sessions));
    let sweeper = sessions.start_background_sweeper(SESSION_SWEEP_INTERVAL);

    let bind = (config.bind_address.clone(), config.port);
    log::info!("Listening on http://{}:{}", bind.0, bind.1);

    let started_at = std::time::Instant::now();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                catalog: Arc::clone(&catalog),
                category_order: Arc::clone(&category_order),
                sessions: Arc::clone(&sessions),
                leads: Arc::clone(&leads),
                started_at,
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::api::config)
            .configure(controllers::page::config)
    })
    .bind(bind)?
    .run();

    let result = server.await;
    sweeper.abort();
    log::info!("Shutdown complete");
    result
}
