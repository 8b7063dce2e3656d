// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Generator routes
    cfg.service(
        web::scope("/generator")
            .route("/passwords", web::post().to(handlers::generator::generate_passwords))
            .route("/preview", web::post().to(handlers::generator::preview_policy))
            .route("/estimate", web::post().to(handlers::generator::estimate_strength))
            .route("/thresholds", web::get().to(handlers::generator::get_thresholds))
    );
}
