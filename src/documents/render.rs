//! Template rendering with strict undefined handling.

use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use super::store::TemplateRecord;
use super::types::{value_to_text, VariableSet};
use super::validation::validate_variables;
use super::GenerationError;

/// Variables the renderer fills in when the caller leaves them out.
pub const DEFAULT_VARIABLES: [&str; 2] = ["organization_name", "jurisdiction"];

/// Configured values for `DEFAULT_VARIABLES`.
#[derive(Debug, Clone)]
pub struct DocumentDefaults {
    pub organization_name: String,
    pub jurisdiction: String,
}

impl DocumentDefaults {
    fn value_for(&self, name: &str) -> Option<&str> {
        match name {
            "organization_name" => Some(&self.organization_name),
            "jurisdiction" => Some(&self.jurisdiction),
            _ => None,
        }
    }
}

/// Renders template bodies against caller variables plus defaults.
pub struct TemplateRenderer {
    env: Environment<'static>,
    defaults: DocumentDefaults,
}

impl TemplateRenderer {
    pub fn new(defaults: DocumentDefaults) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        Self { env, defaults }
    }

    pub fn defaults(&self) -> &DocumentDefaults {
        &self.defaults
    }

    /// Jurisdiction for a request: the caller's value or the configured default.
    pub fn jurisdiction_for(&self, variables: &VariableSet) -> String {
        variables
            .get("jurisdiction")
            .filter(|value| !value.is_null())
            .map(value_to_text)
            .unwrap_or_else(|| self.defaults.jurisdiction.clone())
    }

    /// Copy of `variables` with missing or null defaults filled in. The input is never modified.
    pub fn with_defaults(&self, variables: &VariableSet) -> VariableSet {
        let mut context = variables.clone();
        for name in DEFAULT_VARIABLES {
            if let Some(value) = self.defaults.value_for(name) {
                let slot = context.entry(name.to_string()).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = Value::String(value.to_string());
                }
            }
        }
        context
    }

    /// Validate, inject defaults and render the record body.
    pub fn render(
        &self,
        record: &TemplateRecord,
        variables: &VariableSet,
    ) -> Result<String, GenerationError> {
        validate_variables(record, variables)?;

        let context = self.with_defaults(variables);
        self.env
            .render_str(&record.body, &context)
            .map_err(|err| match err.kind() {
                ErrorKind::UndefinedError => {
                    GenerationError::UndefinedVariable(undefined_name(record, &context, &err))
                }
                _ => GenerationError::Render(err),
            })
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier pattern"))
}

/// Name of the unresolved reference: taken from the failing expression when the
/// engine reports its location, else the first unguarded reference in body order.
fn undefined_name(record: &TemplateRecord, context: &VariableSet, err: &minijinja::Error) -> String {
    let candidates: Vec<String> = record
        .unguarded_references()
        .into_iter()
        .filter(|name| !context.contains_key(name))
        .collect();

    err.range()
        .and_then(|range| record.body.get(range))
        .and_then(|expr| {
            identifier_pattern()
                .find_iter(expr)
                .find(|m| candidates.iter().any(|name| name == m.as_str()))
                .map(|m| m.as_str().to_string())
        })
        .or_else(|| candidates.first().cloned())
        .or_else(|| err.detail().map(str::to_string))
        .unwrap_or_else(|| err.to_string())
}
