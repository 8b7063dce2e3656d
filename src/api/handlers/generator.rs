// src/api/handlers/generator.rs

use std::sync::Arc;
use actix_web::{web, HttpResponse, Responder};
use crate::api::ApiState;
use crate::api::types::{
    EstimateRequest, GenerationRequest, GenerationResponse, PreviewResponse, ThresholdsResponse,
};

/// Generate a batch of passwords
///
/// Resolves the policy (unset fields use the server defaults), draws the
/// batch from the OS random source and rates it.
#[utoipa::path(
    post,
    path = "/generator/passwords",
    tag = "Generator",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated passwords", body = GenerationResponse),
        (status = 400, description = "Invalid policy", body = GenerationResponse),
        (status = 500, description = "Server error", body = GenerationResponse)
    )
)]
pub async fn generate_passwords(
    state: web::Data<Arc<ApiState>>,
    generation_req: web::Json<GenerationRequest>,
) -> HttpResponse {
    let raw = generation_req.to_policy(&state.config);
    let state = Arc::clone(state.get_ref());

    // Large batches are CPU-bound; keep them off the async workers
    match web::block(move || state.service.generate(&raw)).await {
        Ok(Ok(outcome)) => HttpResponse::Ok().json(GenerationResponse::from(outcome)),
        Ok(Err(e)) => HttpResponse::BadRequest().json(GenerationResponse::error(e.to_string())),
        Err(e) => {
            log::error!("Generation task failed: {}", e);
            HttpResponse::InternalServerError().json(GenerationResponse::error("Failed to generate passwords"))
        }
    }
}

/// Preview a policy
///
/// Reports the resolved pool and entropy without generating anything.
#[utoipa::path(
    post,
    path = "/generator/preview",
    tag = "Generator",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Resolved policy", body = PreviewResponse),
        (status = 400, description = "Invalid policy", body = PreviewResponse)
    )
)]
pub async fn preview_policy(
    state: web::Data<Arc<ApiState>>,
    generation_req: web::Json<GenerationRequest>,
) -> HttpResponse {
    let raw = generation_req.to_policy(&state.config);
    match state.service.preview(&raw) {
        Ok(preview) => HttpResponse::Ok().json(PreviewResponse {
            success: true,
            preview: Some(preview),
            error: None,
        }),
        Err(e) => HttpResponse::BadRequest().json(PreviewResponse {
            success: false,
            preview: None,
            error: Some(e.to_string()),
        }),
    }
}

/// Estimate entropy
///
/// `length * log2(pool_size)` bucketed with the configured thresholds.
#[utoipa::path(
    post,
    path = "/generator/estimate",
    tag = "Generator",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Entropy estimate", body = crate::models::EntropyReport)
    )
)]
pub async fn estimate_strength(
    state: web::Data<Arc<ApiState>>,
    estimate_req: web::Json<EstimateRequest>,
) -> impl Responder {
    let report = state.service.estimator().estimate(estimate_req.length, estimate_req.pool_size);
    HttpResponse::Ok().json(report)
}

/// Strength rating table
#[utoipa::path(
    get,
    path = "/generator/thresholds",
    tag = "Generator",
    responses(
        (status = 200, description = "Active rating buckets", body = ThresholdsResponse)
    )
)]
pub async fn get_thresholds(state: web::Data<Arc<ApiState>>) -> impl Responder {
    HttpResponse::Ok().json(ThresholdsResponse::from(state.service.estimator().thresholds()))
}
