use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::documents::{GenerationResult, VariableSet};

fn default_true() -> bool {
    true
}

fn default_filename() -> String {
    "document.pdf".to_string()
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateRequest {
    pub document_type: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variables: VariableSet,
    /// Polish the rendered text through the enhancement service.
    #[serde(default = "default_true")]
    pub enhance: bool,
    /// Tone requested from the enhancement service.
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub jurisdiction: String,
    pub content: String,
    #[schema(value_type = Object)]
    pub variables_used: VariableSet,
    pub enhanced: bool,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            doc_type: result.type_id.as_str().to_string(),
            jurisdiction: result.jurisdiction,
            content: result.content,
            variables_used: result.variables_used,
            enhanced: result.enhanced,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ExportPdfRequest {
    pub content: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ValidateVariablesRequest {
    pub document_type: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub variables: VariableSet,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: Some("All required variables present".to_string()),
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DocumentTypesResponse {
    pub types: Vec<String>,
    pub count: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub api_connected: bool,
    pub templates_available: usize,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    pub endpoints: Vec<String>,
}
