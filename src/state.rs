//! Shared application state, built once at startup.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::documents::{
    DocumentGenerator, EnhancementClient, EnhancementError, TemplateStore, TextGenerator,
};
use crate::export::PdfExporter;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<DocumentGenerator>,
    pub exporter: PdfExporter,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Production state with the configured text-generation backend.
    pub fn new(config: AppConfig) -> Result<Self, EnhancementError> {
        let enhancer = EnhancementClient::from_config(&config.openai)?;
        Ok(Self::with_enhancer(config, enhancer))
    }

    /// State with an explicit text-generation backend.
    pub fn with_backend(config: AppConfig, backend: Arc<dyn TextGenerator>) -> Self {
        Self::with_enhancer(config, EnhancementClient::new(backend))
    }

    pub fn with_enhancer(config: AppConfig, enhancer: EnhancementClient) -> Self {
        let generator = DocumentGenerator::new(
            TemplateStore::new(config.templates_dir.clone()),
            config.defaults.clone(),
            enhancer,
        );
        Self {
            generator: Arc::new(generator),
            exporter: PdfExporter::new(config.export_dir.clone()),
            config: Arc::new(config),
        }
    }
}
