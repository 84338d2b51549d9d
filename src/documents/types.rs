//! Core document types shared by the pipeline, the HTTP layer and the CLI.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::GenerationError;

/// Variables supplied by the caller, keyed by name.
pub type VariableSet = BTreeMap<String, Value>;

/// Value of `GenerationResult::source` for every generated document.
pub const GENERATED_SOURCE: &str = "generated";

/// Closed set of supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Nda,
    Employment,
    SaasTerms,
    FreelancerContract,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Nda,
        DocumentType::Employment,
        DocumentType::SaasTerms,
        DocumentType::FreelancerContract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nda => "nda",
            Self::Employment => "employment",
            Self::SaasTerms => "saas_terms",
            Self::FreelancerContract => "freelancer_contract",
        }
    }

    /// Identifiers of every supported type, in declaration order.
    pub fn ids() -> Vec<&'static str> {
        Self::ALL.iter().map(DocumentType::as_str).collect()
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == s)
            .ok_or_else(|| GenerationError::UnsupportedType(s.to_string()))
    }
}

/// Outcome of a successful `generate` call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub type_id: DocumentType,
    pub jurisdiction: String,
    pub content: String,
    pub variables_used: VariableSet,
    /// True only when the enhancement service returned text.
    pub enhanced: bool,
    pub source: &'static str,
}

/// Render a scalar variable value as plain text.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
