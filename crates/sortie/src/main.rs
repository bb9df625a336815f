use clap::{Parser, Subcommand, ValueEnum};
use models::ValidationResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use validators::RecordKind;

#[derive(Debug, Parser)]
#[command(
    name = "sortie",
    about = "Mission, unit and airbase record validator",
    version,
    long_about = "Validates mission, unit and airbase records written as YAML or JSON.\n\nExamples:\n  sortie validate missions/ --kind mission           # Validate every record in a directory\n  sortie validate base.yaml --kind airbase --strict   # Treat warnings as errors\n  sortie validate unit.json --kind unit --format json # Machine-readable output\n  sortie kinds                                        # List the record kinds"
)]
struct Sortie {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode with extensive details
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate record files
    Validate {
        /// Record file, or directory of .yaml/.yml/.json records
        path: PathBuf,

        /// Record kind to validate against
        #[arg(short, long, value_parser = parse_record_kind)]
        kind: RecordKind,

        /// Treat warnings as errors
        #[arg(short, long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the record kinds and the fields they require
    Kinds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_record_kind(s: &str) -> Result<RecordKind, String> {
    s.parse()
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn is_valid(&self) -> bool {
        self.result.as_ref().map_or(false, |result| result.is_valid())
    }
}

fn evaluate(path: &Path, kind: RecordKind, strict: bool) -> FileReport {
    match evaluator::evaluate_record_file(path, kind, strict) {
        Ok(result) => FileReport {
            path: path.display().to_string(),
            result: Some(result),
            error: None,
        },
        Err(e) => {
            logging::warning(&e.to_string());
            FileReport {
                path: path.display().to_string(),
                result: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn print_text(reports: &[FileReport], color: bool) {
    for report in reports {
        match (&report.result, &report.error) {
            (Some(result), _) => {
                let marker = if result.is_valid() { "✅" } else { "❌" };
                println!("\n{} {}", marker, report.path);
                println!("{}", evaluator::render_report(result, color));
            }
            (None, Some(error)) => {
                println!("\n❌ Error processing {}: {}", report.path, error);
            }
            (None, None) => {}
        }
    }

    let valid_count = reports.iter().filter(|report| report.is_valid()).count();
    println!(
        "\nSummary: {} valid, {} invalid",
        valid_count,
        reports.len() - valid_count
    );
}

fn run_validate(
    path: &Path,
    kind: RecordKind,
    strict: bool,
    format: OutputFormat,
    color: bool,
) -> Result<bool, String> {
    let files = evaluator::collect_record_files(path).map_err(|e| e.to_string())?;
    logging::info(&format!(
        "Validating {} record file(s) as {}{}",
        files.len(),
        kind,
        if strict { " (strict)" } else { "" }
    ));

    let reports: Vec<FileReport> = files
        .iter()
        .map(|file| evaluate(file, kind, strict))
        .collect();

    match format {
        OutputFormat::Text => print_text(&reports, color),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .map_err(|e| format!("Failed to serialize report: {}", e))?;
            println!("{}", json);
        }
    }

    Ok(reports.iter().all(FileReport::is_valid))
}

fn print_kinds() {
    for kind in RecordKind::ALL {
        println!("{}", kind);
        println!("  required: {}", kind.required_fields().join(", "));
        println!("  optional: {}", kind.optional_fields().join(", "));
    }
}

fn main() {
    let cli = Sortie::parse();

    logging::set_log_level(logging::LogLevel::from_flags(cli.verbose, cli.debug));
    logging::debug("Debug mode enabled - showing detailed logs");

    match &cli.command {
        Commands::Validate {
            path,
            kind,
            strict,
            format,
            no_color,
        } => {
            if *no_color {
                colored::control::set_override(false);
            }

            match run_validate(path, *kind, *strict, *format, !no_color) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    logging::error(&e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Kinds => print_kinds(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_command() {
        let cli = Sortie::try_parse_from([
            "sortie", "--verbose", "validate", "records/", "--kind", "Unit", "--strict", "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Validate {
                path,
                kind,
                strict,
                format,
                no_color,
            } => {
                assert_eq!(path, PathBuf::from("records/"));
                assert_eq!(kind, RecordKind::Unit);
                assert!(strict);
                assert_eq!(format, OutputFormat::Json);
                assert!(!no_color);
            }
            Commands::Kinds => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let parsed = Sortie::try_parse_from(["sortie", "validate", "x.yaml", "--kind", "carrier"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_failed_file_counts_as_invalid() {
        let report = evaluate(Path::new("does/not/exist.yaml"), RecordKind::Mission, false);
        assert!(!report.is_valid());
        assert!(report.error.is_some());
        assert!(report.result.is_none());
    }

    #[test]
    fn test_json_report_survives_null_mapping_keys() {
        use validators::Validator;

        let record: serde_yaml::Value =
            serde_yaml::from_str("{type: tank, position: {~: 1, x: 2}, heading: 10}").unwrap();
        let reports = vec![FileReport {
            path: "unit.yaml".to_string(),
            result: Some(validators::unit_validator().validate(&record)),
            error: None,
        }];

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&reports).unwrap()).unwrap();
        let issue = &json[0]["result"]["issues"][0];
        assert_eq!(issue["code"], "position.type");
        assert_eq!(issue["field"], "position");
        assert_eq!(issue["value"]["null"], 1);
        assert_eq!(issue["value"]["x"], 2);
    }
}
