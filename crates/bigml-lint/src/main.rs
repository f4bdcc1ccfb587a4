//! BigML model document linter CLI.
//!
//! Usage:
//!   bigml-lint <directory_or_file> [OPTIONS]

use anyhow::Context;
use bigml::EvaluatorConfig;
use bigml_lint::{lint_directory, lint_file, LintIssue, LintOptions, LintResult, Severity};
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// BigML model document linter
#[derive(Parser, Debug)]
#[command(name = "bigml-lint")]
#[command(
    author,
    version,
    about = "Validate exported BigML model documents for local scoring"
)]
struct Args {
    /// Path to a model document or a directory of model documents
    #[arg(required = true)]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Only show errors (hide warnings)
    #[arg(short = 'e', long)]
    errors_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(short, long)]
    strict: bool,

    /// Evaluator configuration (YAML) the models will be scored with
    #[arg(short, long, env = "BIGML_EVALUATOR_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(failed) if failed => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Lint the requested path and print the report; returns whether the run failed.
fn run(args: &Args) -> anyhow::Result<bool> {
    let config = match &args.config {
        Some(path) => EvaluatorConfig::from_file(path)?,
        None => EvaluatorConfig::default(),
    };
    debug!(?config, "Evaluator configuration");

    let options = LintOptions {
        coercion: config.coercion,
    };
    let result = lint_path(&args.path, &options);

    match args.output {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&result)
                .context("Failed to serialize lint result")?;
            println!("{output}");
        }
        OutputFormat::Text => print_results(&args.path, &result, args.errors_only),
    }

    Ok(result.failed(args.strict))
}

fn lint_path(path: &Path, options: &LintOptions) -> LintResult {
    if path.is_dir() {
        lint_directory(path, options)
    } else {
        lint_file(path, options)
    }
}

fn print_results(path: &Path, result: &LintResult, errors_only: bool) {
    println!("{BOLD}{CYAN}BigML Model Linter{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!("{DIM}Scanning:{RESET} {CYAN}{}{RESET}", path.display());
    println!(
        "{DIM}Checked:{RESET}  {BOLD}{}{RESET} model file(s)\n",
        result.files_checked
    );

    let mut issues_by_file: BTreeMap<&PathBuf, Vec<&LintIssue>> = BTreeMap::new();
    for issue in &result.issues {
        if errors_only && issue.severity != Severity::Error {
            continue;
        }
        issues_by_file.entry(&issue.file).or_default().push(issue);
    }

    if issues_by_file.is_empty() {
        println!("{GREEN}{BOLD}No issues found!{RESET}\n");
    }

    for (file, issues) in &issues_by_file {
        let file_errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let file_warnings = issues.len() - file_errors;

        let status = if file_errors > 0 {
            format!("{RED}FAIL{RESET}")
        } else {
            format!("{YELLOW}WARN{RESET}")
        };
        let file_name = file.file_name().unwrap_or_default().to_string_lossy();
        println!(
            "{status} {BOLD}{CYAN}{file_name}{RESET} {DIM}({RED}{file_errors} error(s){RESET}{DIM}, {YELLOW}{file_warnings} warning(s){RESET}{DIM}){RESET}"
        );

        for issue in issues {
            print_issue(issue);
        }
        println!();
    }

    println!("{DIM}{RULE}{RESET}");
    println!("{BOLD}{CYAN}Summary{RESET}");
    println!("{DIM}{RULE}{RESET}");
    println!(
        "  {DIM}Files checked:{RESET} {BOLD}{}{RESET}",
        result.files_checked
    );
    if result.errors > 0 {
        println!("  {RED}Errors:{RESET}    {BOLD}{RED}{}{RESET}", result.errors);
    } else {
        println!("  {GREEN}Errors:{RESET}    {BOLD}{GREEN}0{RESET}");
    }
    if result.warnings > 0 {
        println!(
            "  {YELLOW}Warnings:{RESET}  {BOLD}{YELLOW}{}{RESET}",
            result.warnings
        );
    } else {
        println!("  {DIM}Warnings:{RESET}  {BOLD}0{RESET}");
    }
    println!();

    if result.errors == 0 && result.warnings == 0 {
        println!("{GREEN}{BOLD}All checks passed!{RESET}");
    } else if result.errors == 0 {
        println!("{YELLOW}{BOLD}Passed with warnings{RESET}");
    } else {
        println!("{RED}{BOLD}Linting failed with errors{RESET}");
    }
}

fn print_issue(issue: &LintIssue) {
    let color = severity_color(issue.severity);
    let marker = format!("{color}|{RESET}");
    let location = issue
        .location
        .as_ref()
        .map(|l| format!("{DIM}[{RESET}{CYAN}{l}{RESET}{DIM}]{RESET} "))
        .unwrap_or_default();

    println!(
        "  {marker} {location}{BOLD}{color}{}{RESET}: {} {DIM}({color}{}{DIM}){RESET}",
        issue.severity.label(),
        issue.message,
        issue.code
    );
    if let Some(suggestion) = &issue.suggestion {
        println!("  {marker}   {GREEN}-> {suggestion}{RESET}");
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
    }
}
