//! Required-variable validation.

use super::store::TemplateRecord;
use super::types::VariableSet;
use super::GenerationError;

/// Names in `record.required_variables` absent from `variables`, sorted and deduplicated.
pub fn missing_variables(record: &TemplateRecord, variables: &VariableSet) -> Vec<String> {
    let mut missing: Vec<String> = record
        .required_variables
        .iter()
        .filter(|name| !variables.contains_key(name.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    missing
}

/// Fail with `MissingVariables` naming every absent required variable.
pub fn validate_variables(
    record: &TemplateRecord,
    variables: &VariableSet,
) -> Result<(), GenerationError> {
    let missing = missing_variables(record, variables);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(GenerationError::MissingVariables(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::types::DocumentType;
    use serde_json::json;

    fn record() -> TemplateRecord {
        TemplateRecord {
            type_id: DocumentType::Nda,
            name: "NDA".into(),
            description: "Mutual NDA".into(),
            required_variables: vec![
                "party_b".into(),
                "party_a".into(),
                "effective_date".into(),
            ],
            optional_variables: vec!["term_years".into()],
            body: String::new(),
        }
    }

    #[test]
    fn test_all_present() {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), json!("Acme Inc"));
        variables.insert("party_b".into(), json!("Globex Corp"));
        variables.insert("effective_date".into(), json!("2024-01-01"));
        assert!(validate_variables(&record(), &variables).is_ok());
    }

    #[test]
    fn test_reports_every_missing_name() {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), json!("Acme Inc"));
        let err = validate_variables(&record(), &variables).unwrap_err();
        match err {
            GenerationError::MissingVariables(names) => {
                assert_eq!(names, vec!["effective_date", "party_b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_and_optional_variables_are_ignored() {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), json!("A"));
        variables.insert("party_b".into(), json!("B"));
        variables.insert("effective_date".into(), json!("2024-01-01"));
        variables.insert("unrelated".into(), json!(42));
        assert!(missing_variables(&record(), &variables).is_empty());
    }

    #[test]
    fn test_null_value_counts_as_supplied() {
        let mut variables = VariableSet::new();
        variables.insert("party_a".into(), serde_json::Value::Null);
        let missing = missing_variables(&record(), &variables);
        assert!(!missing.contains(&"party_a".to_string()));
    }
}
