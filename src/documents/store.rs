//! Template store backed by one JSON file per document type.
//!
//! Records are read from disk on every lookup; nothing is cached.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use utoipa::ToSchema;

use super::render::DEFAULT_VARIABLES;
use super::types::DocumentType;
use super::GenerationError;

/// On-disk shape of a template file.
#[derive(Debug, Deserialize)]
struct TemplateFile {
    name: String,
    description: String,
    #[serde(default)]
    required_variables: Vec<String>,
    #[serde(default)]
    optional_variables: Vec<String>,
    template: String,
}

/// Static definition of a document type's metadata and body.
#[derive(Debug, Clone)]
pub struct TemplateRecord {
    pub type_id: DocumentType,
    pub name: String,
    pub description: String,
    pub required_variables: Vec<String>,
    pub optional_variables: Vec<String>,
    pub body: String,
}

/// Public metadata of a template, without its body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateSummary {
    pub type_id: String,
    pub name: String,
    pub description: String,
    pub required_variables: Vec<String>,
    pub optional_variables: Vec<String>,
}

fn placeholder_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)").expect("valid output pattern"),
            Regex::new(r"\{%-?\s*(?:el)?if\s+([A-Za-z_][A-Za-z0-9_]*)\s+is\s+(?:not\s+)?defined")
                .expect("valid guard pattern"),
        ]
    })
}

impl TemplateRecord {
    /// Every variable name the body references, either as output or in an `is defined` guard.
    pub fn placeholders(&self) -> BTreeSet<String> {
        placeholder_patterns()
            .iter()
            .flat_map(|pattern| pattern.captures_iter(&self.body))
            .map(|caps| caps[1].to_string())
            .collect()
    }

    /// Output references in body order, skipping names tested with `is defined` anywhere.
    pub fn unguarded_references(&self) -> Vec<String> {
        let [output, guard] = placeholder_patterns();
        let guarded: BTreeSet<&str> = guard
            .captures_iter(&self.body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect();

        let mut names: Vec<String> = Vec::new();
        for caps in output.captures_iter(&self.body) {
            let name = &caps[1];
            if !guarded.contains(name) && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Consistency problems between the declared variable lists and the body.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for name in &self.required_variables {
            if self.optional_variables.contains(name) {
                issues.push(format!("'{name}' is declared both required and optional"));
            }
        }

        for name in self.placeholders() {
            let declared = self.required_variables.contains(&name)
                || self.optional_variables.contains(&name)
                || DEFAULT_VARIABLES.contains(&name.as_str());
            if !declared {
                issues.push(format!("body references undeclared variable '{name}'"));
            }
        }

        issues
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            type_id: self.type_id.as_str().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            required_variables: self.required_variables.clone(),
            optional_variables: self.optional_variables.clone(),
        }
    }
}

/// Read-only access to the templates directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a record by raw identifier; unknown identifiers never reach the filesystem.
    pub fn load_by_id(&self, type_id: &str) -> Result<TemplateRecord, GenerationError> {
        let doc_type: DocumentType = type_id.parse()?;
        self.load(doc_type)
    }

    pub fn load(&self, doc_type: DocumentType) -> Result<TemplateRecord, GenerationError> {
        let path = self.dir.join(format!("{}.json", doc_type.as_str()));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(GenerationError::TemplateMissing {
                    type_id: doc_type.as_str().to_string(),
                    path,
                });
            }
            Err(source) => {
                return Err(GenerationError::TemplateIo {
                    type_id: doc_type.as_str().to_string(),
                    source,
                });
            }
        };

        let file: TemplateFile =
            serde_json::from_str(&raw).map_err(|source| GenerationError::TemplateInvalid {
                type_id: doc_type.as_str().to_string(),
                source,
            })?;

        log::debug!("Loaded template '{}' from {}", doc_type, path.display());

        Ok(TemplateRecord {
            type_id: doc_type,
            name: file.name,
            description: file.description,
            required_variables: file.required_variables,
            optional_variables: file.optional_variables,
            body: file.template,
        })
    }

    /// Load every supported template, in declaration order.
    pub fn load_all(&self) -> Result<Vec<TemplateRecord>, GenerationError> {
        DocumentType::ALL
            .into_iter()
            .map(|doc_type| self.load(doc_type))
            .collect()
    }

    /// Check every supported template and log problems. Returns the number of loadable templates.
    pub fn verify(&self) -> usize {
        let mut available = 0;
        for doc_type in DocumentType::ALL {
            match self.load(doc_type) {
                Ok(record) => {
                    available += 1;
                    for issue in record.consistency_issues() {
                        log::warn!("Template '{}': {}", doc_type, issue);
                    }
                }
                Err(e) => log::error!("Template '{}' unavailable: {}", doc_type, e),
            }
        }
        available
    }
}
