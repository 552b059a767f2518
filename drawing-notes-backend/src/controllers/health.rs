use actix_web::{web, HttpResponse, Responder};
use drawing_notes_types::{ApiResponse, ServiceStatus};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(ServiceStatus {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        notes_loaded: state.catalog.len(),
        active_sessions: state.sessions.len(),
        leads_configured: state.leads.is_configured(),
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}
