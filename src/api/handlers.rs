use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::api::models::{
    DocumentTypesResponse, ExportPdfRequest, GenerateRequest, GenerateResponse, HealthResponse,
    ServiceInfo, ValidateVariablesRequest, ValidationResponse,
};
use crate::documents::{DocumentType, EnhancementOptions, GenerationError, TemplateSummary};
use crate::export::pdf::export_filename;
use crate::state::AppState;
use crate::ErrorResponse;

fn generation_error_response(err: &GenerationError) -> HttpResponse {
    if err.is_client_error() {
        warn!("Rejected generation request: {}", err);
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&err.to_string()))
    } else {
        error!("Generation failed: {}", err);
        HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
            "Generation failed: {err}"
        )))
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    )
)]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        name: "LegalDraft AI".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        endpoints: [
            "/generate",
            "/templates",
            "/export-pdf",
            "/validate-variables",
            "/document-types",
            "/health",
            "/swagger-ui/",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Service",
    responses(
        (status = 200, description = "Health status", body = HealthResponse)
    )
)]
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let templates_available = DocumentType::ALL
        .iter()
        .filter(|doc_type| data.generator.store().load(**doc_type).is_ok())
        .count();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        api_connected: data.generator.enhancement_configured(),
        templates_available,
    })
}

#[utoipa::path(
    get,
    path = "/templates",
    tag = "Documents",
    responses(
        (status = 200, description = "Available templates", body = [TemplateSummary]),
        (status = 500, description = "Template storage error", body = ErrorResponse)
    )
)]
pub async fn list_templates(data: web::Data<AppState>) -> impl Responder {
    match data.generator.list_templates() {
        Ok(templates) => HttpResponse::Ok().json(templates),
        Err(e) => {
            error!("Failed to list templates: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/generate",
    tag = "Documents",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Document generated", body = GenerateResponse),
        (status = 400, description = "Invalid document type or variables", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_document(
    data: web::Data<AppState>,
    req: web::Json<GenerateRequest>,
) -> impl Responder {
    let req = req.into_inner();
    info!(
        "Generating '{}' document (enhance: {})",
        req.document_type, req.enhance
    );

    let options = EnhancementOptions { tone: req.tone };
    match data
        .generator
        .generate(&req.document_type, req.variables, req.enhance, &options)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(GenerateResponse::from(result)),
        Err(e) => generation_error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/export-pdf",
    tag = "Documents",
    request_body = ExportPdfRequest,
    responses(
        (status = 200, description = "PDF file", content_type = "application/pdf"),
        (status = 500, description = "PDF export failed", body = ErrorResponse)
    )
)]
pub async fn export_pdf(
    data: web::Data<AppState>,
    req: web::Json<ExportPdfRequest>,
) -> impl Responder {
    let ExportPdfRequest { content, filename } = req.into_inner();
    let download_name = export_filename(&filename);
    let exporter = data.exporter.clone();

    let path = match web::block(move || exporter.create_pdf(&content, &filename)).await {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            error!("PDF export failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("PDF export failed: {e}")));
        }
        Err(e) => {
            error!("PDF export task failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("PDF export failed"));
        }
    };

    let read = tokio::fs::read(&path).await;
    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!("Failed to remove exported PDF {}: {}", path.display(), e);
    }

    match read {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(download_name)],
            })
            .body(bytes),
        Err(e) => {
            error!("Failed to read exported PDF {}: {}", path.display(), e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("PDF export failed: {e}")))
        }
    }
}

#[utoipa::path(
    post,
    path = "/validate-variables",
    tag = "Documents",
    request_body = ValidateVariablesRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 500, description = "Template storage error", body = ErrorResponse)
    )
)]
pub async fn validate_variables(
    data: web::Data<AppState>,
    req: web::Json<ValidateVariablesRequest>,
) -> impl Responder {
    match data
        .generator
        .validate_variables(&req.document_type, &req.variables)
    {
        Ok(()) => HttpResponse::Ok().json(ValidationResponse::valid()),
        Err(e) if e.is_client_error() => {
            HttpResponse::Ok().json(ValidationResponse::invalid(e.to_string()))
        }
        Err(e) => {
            error!("Validation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/document-types",
    tag = "Documents",
    responses(
        (status = 200, description = "Supported document types", body = DocumentTypesResponse)
    )
)]
pub async fn get_document_types() -> impl Responder {
    let types: Vec<String> = DocumentType::ids().into_iter().map(String::from).collect();
    HttpResponse::Ok().json(DocumentTypesResponse {
        count: types.len(),
        types,
    })
}
