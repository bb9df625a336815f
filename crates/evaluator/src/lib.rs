use colored::*;
use models::{Severity, ValidationResult};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validators::{CompositeValidator, RecordKind, Validator};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

fn paint(severity: Severity, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match severity {
        Severity::Critical => text.red().bold().to_string(),
        Severity::Error => text.red().to_string(),
        Severity::Warning => text.yellow().to_string(),
        Severity::Info => text.blue().to_string(),
    }
}

/// Human-readable report: the summary line, then one entry per issue with
/// its suggestion underneath.
pub fn render_report(result: &ValidationResult, color: bool) -> String {
    let mut out = result.summary();

    if result.issues().is_empty() {
        return out;
    }

    out.push_str("\n\nValidation Issues:");
    for issue in result.issues() {
        let field = issue
            .field
            .as_ref()
            .map(|field| format!(" [{}]", field))
            .unwrap_or_default();

        out.push_str(&format!(
            "\n  {} {}{}: {}",
            issue.severity.icon(),
            paint(issue.severity, issue.severity.label(), color),
            field,
            issue.message
        ));

        if let Some(suggestion) = &issue.suggestion {
            out.push_str(&format!("\n    💡 Suggestion: {}", suggestion));
        }
    }

    out
}

/// Runs `validator` over `data`, printing the report when asked. The result
/// is returned exactly as the validator produced it.
pub fn validate_data(data: &Value, validator: &dyn Validator, print_results: bool) -> ValidationResult {
    let result = validator.validate(data);

    if print_results {
        println!("{}", render_report(&result, true));
    }

    result
}

pub fn load_record(path: &Path) -> Result<Value, EvaluationError> {
    logging::debug(&format!("Loading record from {}", path.display()));

    let content = fs::read_to_string(path).map_err(|source| EvaluationError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| EvaluationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Preset validator for `kind`, wrapped so that warnings fail validation
/// when `strict` is set.
pub fn record_validator(kind: RecordKind, strict: bool) -> CompositeValidator {
    if strict {
        CompositeValidator::default()
            .with(kind.validator())
            .strict(true)
    } else {
        kind.validator()
    }
}

pub fn evaluate_record_file(
    path: &Path,
    kind: RecordKind,
    strict: bool,
) -> Result<ValidationResult, EvaluationError> {
    let record = load_record(path)?;
    let result = record_validator(kind, strict).validate(&record);

    logging::debug(&format!(
        "{} as {}: {} issue(s)",
        path.display(),
        kind,
        result.issues().len()
    ));

    Ok(result)
}

pub fn is_record_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml" | "json"),
        None => false,
    }
}

/// Record files named by `path`: the file itself, or every record file
/// directly inside a directory, sorted by name.
pub fn collect_record_files(path: &Path) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Path does not exist: {}", path.display()),
        ));
    }

    let mut records = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_record_file(&entry_path) {
            records.push(entry_path);
        }
    }
    records.sort();

    Ok(records)
}
