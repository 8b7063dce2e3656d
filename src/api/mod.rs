// src/api/mod.rs
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use actix_cors::Cors;
use std::sync::Arc;
use utoipa::OpenApi;
use crate::core::{Config, PasswordService};

pub mod types;
pub mod routes;
pub mod handlers;

/// Shared, read-only state handed to every request.
pub struct ApiState {
    pub service: PasswordService,
    pub config: Config,
}

impl ApiState {
    pub fn new(config: Config) -> Self {
        Self {
            service: PasswordService::new(&config),
            config,
        }
    }
}

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Generator endpoints
        crate::api::handlers::generator::generate_passwords,
        crate::api::handlers::generator::preview_policy,
        crate::api::handlers::generator::estimate_strength,
        crate::api::handlers::generator::get_thresholds,
    ),
    components(
        schemas(
            crate::api::types::GenerationRequest,
            crate::api::types::GenerationResponse,
            crate::api::types::PasswordItem,
            crate::api::types::PreviewResponse,
            crate::api::types::EstimateRequest,
            crate::api::types::ThresholdBucket,
            crate::api::types::ThresholdsResponse,

            // Core models
            crate::core::PolicyPreview,
            crate::generators::policy::ClassAlphabet,
            crate::models::CharacterClass,
            crate::models::EntropyReport,
            crate::models::StrengthLabel,
        )
    ),
    tags(
        (name = "Generator", description = "Password generation and strength estimation endpoints")
    ),
    info(
        title = "Rust PassGen API",
        version = "0.1.0",
        description = "Policy-driven secure password generation",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub async fn start_server(state: Arc<ApiState>, address: &str, port: u16) -> std::io::Result<()> {
    log::info!("Starting PassGen API server on {}:{}", address, port);

    let state_data = web::Data::new(state);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Content-Type", "Accept"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(state_data.clone())
            .route("/api-docs/openapi.json", web::get().to(openapi_json))
            .configure(routes::configure_routes)
    })
    .bind((address, port))?
    .run()
    .await
}
