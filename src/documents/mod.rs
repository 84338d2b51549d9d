//! Documents module - business logic for producing legal documents from templates.
//!
//! The pipeline is split into small stages:
//! - `store` - loads `TemplateRecord`s from the templates directory
//! - `validation` - checks required variables against a record
//! - `render` - injects defaults and renders the body with minijinja
//! - `enhance` - best-effort polish through an external text-generation service
//! - `generator` - composes the stages into a single `generate` call

pub mod common;
pub mod enhance;
pub mod generator;
pub mod render;
pub mod store;
pub mod types;
pub mod validation;

pub use enhance::{
    EnhancementClient, EnhancementError, EnhancementOptions, EnhancementOutcome, OpenAiGenerator,
    TextGenerator,
};
pub use generator::DocumentGenerator;
pub use render::{DocumentDefaults, TemplateRenderer, DEFAULT_VARIABLES};
pub use store::{TemplateRecord, TemplateStore, TemplateSummary};
pub use types::{DocumentType, GenerationResult, VariableSet, GENERATED_SOURCE};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, validating or rendering a document.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),
    #[error("Template not found for '{type_id}': {}", path.display())]
    TemplateMissing { type_id: String, path: PathBuf },
    #[error("failed to read template for '{type_id}': {source}")]
    TemplateIo {
        type_id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template for '{type_id}' is not valid JSON: {source}")]
    TemplateInvalid {
        type_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing required variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
    #[error("Template references undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("failed to render template: {0}")]
    Render(#[source] minijinja::Error),
}

impl GenerationError {
    /// Whether the failure was caused by the caller's input rather than the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType(_) | Self::MissingVariables(_) | Self::UndefinedVariable(_)
        )
    }
}
