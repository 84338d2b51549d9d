//! Command-line interface for document generation.

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::documents::{DocumentType, EnhancementOptions, VariableSet};
use crate::export::write_pdf;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "legaldraft", version, about = "Generate legal documents with AI")]
pub struct CliArgs {
    /// Type of document to generate
    #[arg(long = "type", value_name = "TYPE", value_parser = parse_document_type)]
    pub doc_type: DocumentType,

    /// First party name (for contracts)
    #[arg(long)]
    pub party_a: Option<String>,

    /// Second party name (for contracts)
    #[arg(long)]
    pub party_b: Option<String>,

    /// Effective date
    #[arg(long)]
    pub effective_date: Option<String>,

    /// Jurisdiction (defaults to DEFAULT_JURISDICTION)
    #[arg(long)]
    pub jurisdiction: Option<String>,

    /// Employee name (for employment agreements)
    #[arg(long)]
    pub employee_name: Option<String>,

    /// Job position
    #[arg(long)]
    pub position: Option<String>,

    /// Annual salary
    #[arg(long)]
    pub salary: Option<String>,

    /// Any other template variable, repeatable
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,

    /// Tone requested from the enhancement service
    #[arg(long)]
    pub tone: Option<String>,

    /// Output file path; a `.pdf` extension writes a PDF
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip enhancement
    #[arg(long)]
    pub no_enhance: bool,
}

fn parse_document_type(value: &str) -> Result<DocumentType, String> {
    value.parse().map_err(|_| {
        format!(
            "unsupported document type '{}' (expected one of: {})",
            value,
            DocumentType::ids().join(", ")
        )
    })
}

fn parse_key_value(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), val.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{value}'")),
    }
}

impl CliArgs {
    /// Variables from `--var` plus the named flags; named flags win.
    pub fn variables(&self) -> VariableSet {
        let mut variables: VariableSet = self
            .vars
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        let named = [
            ("party_a", &self.party_a),
            ("party_b", &self.party_b),
            ("effective_date", &self.effective_date),
            ("jurisdiction", &self.jurisdiction),
            ("employee_name", &self.employee_name),
            ("position", &self.position),
            ("salary", &self.salary),
        ];
        for (name, value) in named {
            if let Some(value) = value {
                variables.insert(name.to_string(), Value::String(value.clone()));
            }
        }

        variables
    }
}

/// Generate the document and write it to `--output` or `out`.
pub async fn run(args: &CliArgs, state: &AppState, out: &mut impl Write) -> anyhow::Result<()> {
    let options = EnhancementOptions {
        tone: args.tone.clone(),
    };
    let result = state
        .generator
        .generate(
            args.doc_type.as_str(),
            args.variables(),
            !args.no_enhance,
            &options,
        )
        .await?;

    match &args.output {
        Some(path) => {
            let is_pdf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if is_pdf {
                write_pdf(&result.content, path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            } else {
                fs::write(path, &result.content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            writeln!(out, "Document saved to {}", path.display())?;
        }
        None => writeln!(out, "{}", result.content)?,
    }

    Ok(())
}

/// Entry point for the `legaldraft` binary.
pub async fn execute(args: CliArgs) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    if !args.no_enhance {
        config.log_startup_warnings();
    }
    let state = AppState::new(config)?;
    let stdout = std::io::stdout();
    run(&args, &state, &mut stdout.lock()).await
}
