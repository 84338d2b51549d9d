#![allow(dead_code)]

use async_trait::async_trait;
use legaldraft::documents::enhance::{CompletionRequest, EnhancementError, TextGenerator};
use legaldraft::{AppConfig, AppState};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock implementation of TextGenerator for testing
pub struct MockTextGenerator {
    reply: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockTextGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, EnhancementError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(reason) => Err(EnhancementError::Status {
                status: 503,
                body: reason.clone(),
            }),
        }
    }
}

/// Configuration using the bundled templates and a scratch export directory.
pub fn test_config(export_dir: &Path) -> AppConfig {
    let export_dir = export_dir.to_string_lossy().to_string();
    AppConfig::from_lookup(|key| match key {
        "EXPORT_DIR" => Some(export_dir.clone()),
        _ => None,
    })
    .expect("default test configuration is valid")
}

pub fn test_state(export_dir: &Path, backend: Arc<MockTextGenerator>) -> AppState {
    AppState::with_backend(test_config(export_dir), backend)
}

/// Complete required variables for each bundled document type.
pub fn sample_variables(type_id: &str) -> Value {
    match type_id {
        "nda" => json!({
            "party_a": "Acme Inc",
            "party_b": "Globex Corp",
            "effective_date": "2024-01-01"
        }),
        "employment" => json!({
            "employee_name": "Jane Smith",
            "position": "Staff Engineer",
            "salary": "$180,000",
            "effective_date": "2024-03-01"
        }),
        "saas_terms" => json!({
            "service_name": "DraftCloud",
            "effective_date": "2024-02-15"
        }),
        "freelancer_contract" => json!({
            "party_a": "Acme Inc",
            "party_b": "Sam Rivera",
            "effective_date": "2024-04-01",
            "scope_of_work": "design and build a marketing website",
            "payment_terms": "$8,000 in two equal milestones"
        }),
        other => panic!("no sample variables for {other}"),
    }
}
