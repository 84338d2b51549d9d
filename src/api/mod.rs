//! HTTP surface: route configuration, handlers and the OpenAPI document.

pub mod handlers;
pub mod models;

use actix_web::{error, web, HttpResponse};
use utoipa::OpenApi;

use crate::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::list_templates,
        handlers::generate_document,
        handlers::export_pdf,
        handlers::validate_variables,
        handlers::get_document_types
    ),
    components(
        schemas(
            models::GenerateRequest,
            models::GenerateResponse,
            models::ExportPdfRequest,
            models::ValidateVariablesRequest,
            models::ValidationResponse,
            models::DocumentTypesResponse,
            models::HealthResponse,
            models::ServiceInfo,
            crate::documents::TemplateSummary,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Documents", description = "Legal document generation endpoints."),
        (name = "Service", description = "Service information and health.")
    ),
    info(title = "LegalDraft AI API", description = "AI-powered legal document generation API")
)]
pub struct ApiDoc;

/// JSON extractor settings; malformed bodies become `ErrorResponse` 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("Rejected malformed JSON body: {}", message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
        )
        .into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource("/").route(web::get().to(handlers::root)))
        .service(web::resource("/health").route(web::get().to(handlers::health_check)))
        .service(web::resource("/templates").route(web::get().to(handlers::list_templates)))
        .service(web::resource("/generate").route(web::post().to(handlers::generate_document)))
        .service(web::resource("/export-pdf").route(web::post().to(handlers::export_pdf)))
        .service(
            web::resource("/validate-variables")
                .route(web::post().to(handlers::validate_variables)),
        )
        .service(
            web::resource("/document-types").route(web::get().to(handlers::get_document_types)),
        );
}
