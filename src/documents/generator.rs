//! Generation pipeline: template load, validate, render, optional enhancement.

use super::enhance::{EnhancementClient, EnhancementOptions, EnhancementOutcome};
use super::render::{DocumentDefaults, TemplateRenderer};
use super::store::{TemplateRecord, TemplateStore, TemplateSummary};
use super::types::{GenerationResult, VariableSet, GENERATED_SOURCE};
use super::validation;
use super::GenerationError;

/// Stateless orchestrator shared by the HTTP handlers and the CLI.
pub struct DocumentGenerator {
    store: TemplateStore,
    renderer: TemplateRenderer,
    enhancer: EnhancementClient,
}

impl DocumentGenerator {
    pub fn new(store: TemplateStore, defaults: DocumentDefaults, enhancer: EnhancementClient) -> Self {
        Self {
            store,
            renderer: TemplateRenderer::new(defaults),
            enhancer,
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    pub fn enhancement_configured(&self) -> bool {
        self.enhancer.is_configured()
    }

    pub fn load_template(&self, type_id: &str) -> Result<TemplateRecord, GenerationError> {
        self.store.load_by_id(type_id)
    }

    pub fn list_templates(&self) -> Result<Vec<TemplateSummary>, GenerationError> {
        Ok(self
            .store
            .load_all()?
            .iter()
            .map(TemplateRecord::summary)
            .collect())
    }

    /// Check that every required variable of `type_id` is present.
    pub fn validate_variables(
        &self,
        type_id: &str,
        variables: &VariableSet,
    ) -> Result<(), GenerationError> {
        let record = self.store.load_by_id(type_id)?;
        validation::validate_variables(&record, variables)
    }

    pub fn render(&self, type_id: &str, variables: &VariableSet) -> Result<String, GenerationError> {
        let record = self.store.load_by_id(type_id)?;
        self.renderer.render(&record, variables)
    }

    pub async fn generate(
        &self,
        type_id: &str,
        variables: VariableSet,
        enhance: bool,
        options: &EnhancementOptions,
    ) -> Result<GenerationResult, GenerationError> {
        let record = self.store.load_by_id(type_id)?;
        let rendered = self.renderer.render(&record, &variables)?;

        let (content, enhanced) = if enhance {
            match self.enhancer.enhance(&rendered, options).await {
                EnhancementOutcome::Enhanced(text) => (text, true),
                EnhancementOutcome::Unavailable(reason) => {
                    log::warn!(
                        "Enhancement unavailable for '{}', returning unenhanced document: {}",
                        record.type_id,
                        reason
                    );
                    (rendered, false)
                }
            }
        } else {
            (rendered, false)
        };

        log::info!(
            "Generated '{}' document ({} chars, enhanced: {})",
            record.type_id,
            content.chars().count(),
            enhanced
        );

        Ok(GenerationResult {
            type_id: record.type_id,
            jurisdiction: self.renderer.jurisdiction_for(&variables),
            content,
            variables_used: variables,
            enhanced,
            source: GENERATED_SOURCE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::common::get_templates_dir;
    use crate::documents::enhance::{CompletionRequest, EnhancementError, TextGenerator};
    use crate::documents::types::DocumentType;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingFailure(AtomicUsize);

    #[async_trait]
    impl TextGenerator for CountingFailure {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, EnhancementError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(EnhancementError::NoChoices)
        }
    }

    struct Uppercase;

    #[async_trait]
    impl TextGenerator for Uppercase {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhancementError> {
            Ok(request.content.to_uppercase())
        }
    }

    fn generator(enhancer: EnhancementClient) -> DocumentGenerator {
        DocumentGenerator::new(
            TemplateStore::new(get_templates_dir()),
            DocumentDefaults {
                organization_name: "Your Company".into(),
                jurisdiction: "US-CA".into(),
            },
            enhancer,
        )
    }

    fn nda_variables() -> VariableSet {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), json!("Acme Inc"));
        variables.insert("party_b".into(), json!("Globex Corp"));
        variables.insert("effective_date".into(), json!("2024-01-01"));
        variables
    }

    #[tokio::test]
    async fn test_generate_nda_without_enhancement() {
        let result = generator(EnhancementClient::disabled())
            .generate("nda", nda_variables(), false, &EnhancementOptions::default())
            .await
            .unwrap();

        assert_eq!(result.type_id, DocumentType::Nda);
        assert_eq!(result.jurisdiction, "US-CA");
        assert!(result.content.contains("Acme Inc"));
        assert!(result.content.contains("Globex Corp"));
        assert_eq!(result.variables_used, nda_variables());
        assert!(!result.enhanced);
        assert_eq!(result.source, "generated");
    }

    #[tokio::test]
    async fn test_enhancement_failure_keeps_rendered_content() {
        let backend = Arc::new(CountingFailure(AtomicUsize::new(0)));
        let g = generator(EnhancementClient::new(backend.clone()));
        let expected = g.render("nda", &nda_variables()).unwrap();

        let result = g
            .generate("nda", nda_variables(), true, &EnhancementOptions::default())
            .await
            .unwrap();

        assert_eq!(backend.0.load(Ordering::SeqCst), 1);
        assert_eq!(result.content, expected);
        assert!(!result.enhanced);
    }

    #[tokio::test]
    async fn test_enhancement_replaces_content() {
        let g = generator(EnhancementClient::new(Arc::new(Uppercase)));
        let result = g
            .generate("nda", nda_variables(), true, &EnhancementOptions::default())
            .await
            .unwrap();
        assert!(result.enhanced);
        assert!(result.content.contains("ACME INC"));
    }

    #[tokio::test]
    async fn test_enhance_flag_false_skips_backend() {
        let backend = Arc::new(CountingFailure(AtomicUsize::new(0)));
        let g = generator(EnhancementClient::new(backend.clone()));
        g.generate("nda", nda_variables(), false, &EnhancementOptions::default())
            .await
            .unwrap();
        assert_eq!(backend.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_reports_all_missing_variables() {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), json!("Acme Inc"));
        let err = generator(EnhancementClient::disabled())
            .generate("nda", variables, false, &EnhancementOptions::default())
            .await
            .unwrap_err();
        match err {
            GenerationError::MissingVariables(names) => {
                assert_eq!(names, vec!["effective_date", "party_b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_generate_unknown_type() {
        let err = generator(EnhancementClient::disabled())
            .generate("lease_agreement", nda_variables(), false, &EnhancementOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_supplied_jurisdiction_is_reported() {
        let mut variables = nda_variables();
        variables.insert("jurisdiction".into(), json!("US-NY"));
        let result = generator(EnhancementClient::disabled())
            .generate("nda", variables, false, &EnhancementOptions::default())
            .await
            .unwrap();
        assert_eq!(result.jurisdiction, "US-NY");
        assert!(result.content.contains("US-NY"));
    }

    #[test]
    fn test_validate_employment_without_variables() {
        let g = generator(EnhancementClient::disabled());
        let record = g.load_template("employment").unwrap();
        let err = g
            .validate_variables("employment", &VariableSet::new())
            .unwrap_err();
        let message = err.to_string();
        for name in &record.required_variables {
            assert!(message.contains(name.as_str()), "{message} should name {name}");
        }
    }

    #[test]
    fn test_list_templates() {
        let templates = generator(EnhancementClient::disabled())
            .list_templates()
            .unwrap();
        let ids: Vec<_> = templates.iter().map(|t| t.type_id.as_str()).collect();
        assert_eq!(ids, DocumentType::ids());
    }
}
