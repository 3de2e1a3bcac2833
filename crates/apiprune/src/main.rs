//! apiprune command line.
//!
//! Prunes Swagger 2.0 / OpenAPI 3.x documents down to selected paths and the
//! components they reach, validates documents, and lists endpoints.

use std::path::Path;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use apiprune_core::{shake_with, PathFilter, ShakeError};
use apiprune_loader::{list_endpoints, load_file, render, LoadError, OutputFormat};
use apiprune_telemetry::{
    log_document_loaded, log_document_pruned, log_document_written, log_validation_failure,
    LogFormat, TelemetryConfig,
};
use apiprune_validator::{validate_document, ValidationError};

#[derive(Parser, Debug)]
#[command(
    name = "apiprune",
    about = "Prune unused paths and components from OpenAPI documents",
    version
)]
struct Cli {
    /// Log level filter (RUST_LOG takes precedence).
    #[arg(long, global = true, env = "APIPRUNE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log output format (text, json or pretty).
    #[arg(long, global = true, env = "APIPRUNE_LOG_FORMAT", default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Keep the selected paths and every component they reach.
    ///
    /// Prints `{document, summary}` where the summary lists the removed paths
    /// and components per kind.
    Shake(ShakeArgs),

    /// Validate document(s) against the Swagger 2.0 / OpenAPI 3.x structure.
    Validate {
        /// Input document file(s) (YAML or JSON).
        #[arg(short, long, required = true, num_args = 1..)]
        spec: Vec<String>,

        /// Output format (text or json).
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the endpoints of a document as `METHOD path` lines.
    Paths {
        /// Input document file (YAML or JSON).
        #[arg(short, long)]
        spec: String,

        #[command(flatten)]
        selection: Selection,
    },
}

/// Path selection shared by `shake` and `paths`.
#[derive(Args, Debug, Default)]
struct Selection {
    /// Keep paths matching this regular expression (repeatable).
    #[arg(short, long = "pattern")]
    patterns: Vec<String>,

    /// Keep this exact path template, e.g. `/users/{id}` (repeatable).
    #[arg(long = "path")]
    templates: Vec<String>,
}

#[derive(Args, Debug)]
struct ShakeArgs {
    /// Input document file (YAML or JSON).
    #[arg(short, long)]
    spec: String,

    #[command(flatten)]
    selection: Selection,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Output format (json or yaml). Defaults to the output file extension, then json.
    #[arg(long)]
    format: Option<String>,

    /// Skip structural validation of the input and the pruned output.
    #[arg(long)]
    no_validate: bool,

    /// Print only the summary.
    #[arg(long)]
    summary_only: bool,
}

/// Failures of the `shake` and `paths` commands.
#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("{path}: {source}")]
    InvalidInput {
        path: String,
        #[source]
        source: ValidationError,
    },

    #[error("pruned document failed validation: {0}")]
    InvalidOutput(#[source] ValidationError),

    #[error(transparent)]
    Shake(#[from] ShakeError),

    #[error(transparent)]
    Render(LoadError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Selection {
    /// Compile patterns and templates into one filter. With neither, every
    /// path is kept.
    fn to_filter(&self) -> Result<PathFilter, ShakeError> {
        PathFilter::from_selection(&self.patterns, &self.templates)
    }
}

/// Pick the output format: explicit flag, then output extension, then JSON.
fn resolve_format(flag: Option<&str>, output: Option<&str>) -> Result<OutputFormat, LoadError> {
    if let Some(name) = flag {
        return OutputFormat::parse(name).ok_or_else(|| LoadError::UnknownFormat(name.to_string()));
    }
    Ok(output
        .and_then(|path| OutputFormat::from_path(Path::new(path)))
        .unwrap_or_default())
}

fn load(path: &str) -> Result<Value, CliError> {
    let document = load_file(Path::new(path)).map_err(|source| CliError::Load {
        path: path.to_string(),
        source,
    })?;
    let path_count = document
        .get("paths")
        .and_then(Value::as_object)
        .map_or(0, |paths| paths.len());
    log_document_loaded!(file = %path, paths = path_count, "document loaded");
    Ok(document)
}

/// Print `rendered` on stdout with exactly one trailing newline.
fn emit(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}

fn shake_file(args: &ShakeArgs) -> Result<(), CliError> {
    let format = resolve_format(args.format.as_deref(), args.output.as_deref())
        .map_err(CliError::Render)?;
    let filter = args.selection.to_filter()?;
    let document = load(&args.spec)?;

    if !args.no_validate {
        validate_document(&document).map_err(|source| {
            log_validation_failure!(file = %args.spec, stage = "input", "document rejected");
            CliError::InvalidInput {
                path: args.spec.clone(),
                source,
            }
        })?;
    }

    let projection = shake_with(&document, &filter)?;

    if !args.no_validate {
        validate_document(&projection.document).map_err(|source| {
            log_validation_failure!(file = %args.spec, stage = "output", "document rejected");
            CliError::InvalidOutput(source)
        })?;
    }

    let summary = &projection.summary;
    log_document_pruned!(
        file = %args.spec,
        removed_paths = summary.removed_paths.len(),
        removed_components = summary.removed_components(),
        "document pruned"
    );

    let rendered = if args.summary_only {
        render(summary, format)
    } else {
        render(&projection, format)
    }
    .map_err(CliError::Render)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            log_document_written!(file = %path, bytes = rendered.len(), "document written");
            eprintln!(
                "pruned {} to {} ({} path(s) and {} component(s) removed)",
                args.spec,
                path,
                summary.removed_paths.len(),
                summary.removed_components()
            );
        }
        None => emit(&rendered),
    }

    Ok(())
}

/// Run the shake command.
fn run_shake(args: &ShakeArgs) -> ExitCode {
    match shake_file(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Validation result for a single document file.
#[derive(serde::Serialize)]
struct ValidationResult {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    errors: Vec<String>,
}

fn validate_file(path: &str) -> ValidationResult {
    let outcome = load_file(Path::new(path))
        .map_err(|e| vec![e.to_string()])
        .and_then(|document| {
            validate_document(&document)
                .map(|version| {
                    document
                        .get(version.marker())
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .map_err(|e| match e.violations() {
                    [] => vec![e.to_string()],
                    violations => violations.to_vec(),
                })
        });

    match outcome {
        Ok(version) => ValidationResult {
            file: path.to_string(),
            valid: true,
            version: Some(version),
            errors: Vec::new(),
        },
        Err(errors) => {
            log_validation_failure!(file = %path, errors = errors.len(), "document rejected");
            ValidationResult {
                file: path.to_string(),
                valid: false,
                version: None,
                errors,
            }
        }
    }
}

/// Run the validate command.
fn run_validate(specs: &[String], output_format: &str) -> ExitCode {
    let results: Vec<ValidationResult> = specs.iter().map(|spec| validate_file(spec)).collect();
    let valid_count = results.iter().filter(|r| r.valid).count();

    if output_format == "json" {
        let output = serde_json::json!({
            "results": results,
            "summary": {
                "total": results.len(),
                "valid": valid_count,
                "invalid": results.len() - valid_count,
            }
        });
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(1);
            }
        }
    } else {
        for result in &results {
            match (&result.version, result.valid) {
                (Some(version), true) => eprintln!("✓ {} is valid ({})", result.file, version),
                _ => eprintln!("✗ {} has {} error(s)", result.file, result.errors.len()),
            }
            for err in &result.errors {
                eprintln!("  {err}");
            }
        }

        eprintln!();
        eprintln!(
            "validated {} document(s): {} valid, {} invalid",
            results.len(),
            valid_count,
            results.len() - valid_count
        );
    }

    if valid_count == results.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Run the paths command.
fn run_paths(spec: &str, selection: &Selection) -> ExitCode {
    let listed = selection
        .to_filter()
        .map_err(CliError::from)
        .and_then(|filter| Ok((filter, load(spec)?)));

    match listed {
        Ok((filter, document)) => {
            for endpoint in list_endpoints(&document)
                .iter()
                .filter(|endpoint| filter.matches(&endpoint.path))
            {
                println!("{endpoint}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(log_format) = LogFormat::parse(&cli.log_format) else {
        eprintln!(
            "error: unknown log format '{}' (expected text, json or pretty)",
            cli.log_format
        );
        return ExitCode::from(1);
    };
    let config = TelemetryConfig::new()
        .with_log_level(&cli.log_level)
        .with_log_format(log_format);
    if let Err(e) = apiprune_telemetry::init(&config) {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }

    match &cli.command {
        Commands::Shake(args) => run_shake(args),
        Commands::Validate { spec, format } => run_validate(spec, format),
        Commands::Paths { spec, selection } => run_paths(spec, selection),
    }
}
