//! quizc - Compile quiz sources into self-grading HTML pages
//!
//! Usage:
//!   quizc [OPTIONS] <INPUT> [OUTPUT]
//!
//! Modes:
//!   (default)  Compile and write the HTML page
//!   --check    Compile and report without writing
//!   --stats    Show quiz statistics
//!
//! Exit codes: 0 success, 1 usage or I/O error, 2 validation errors,
//! 3 syntax error.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use quizdoc_core::render::question_id;
use quizdoc_core::{CompileError, Quiz, SyntaxError, ValidationErrors};
use serde::Serialize;

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // Help and version are not usage errors.
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(config.verbose);

    match run(&config) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.format_timestamp(None);
    builder.init();
}

/// Command-line configuration.
#[derive(Parser, Debug)]
#[command(
    name = "quizc",
    version,
    about = "Compile a quiz source file into a self-grading HTML page"
)]
struct Config {
    /// Quiz source file
    input: PathBuf,

    /// Output HTML file [default: INPUT with an .html extension]
    output: Option<PathBuf>,

    /// Write the page into DIR (created if missing) instead of next to INPUT
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    out_dir: Option<PathBuf>,

    /// Check the quiz for errors without writing anything
    #[arg(long, conflicts_with_all = ["stats", "output", "out_dir"])]
    check: bool,

    /// Show quiz statistics instead of writing the page
    #[arg(long, conflicts_with_all = ["output", "out_dir"])]
    stats: bool,

    /// Output in JSON format on stdout (stderr keeps a one-line summary)
    #[arg(short, long)]
    json: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Build,
    Check,
    Stats,
}

impl Config {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.stats {
            Mode::Stats
        } else {
            Mode::Build
        }
    }

    fn output_path(&self) -> Result<PathBuf> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }

        let html = self.input.with_extension("html");
        match &self.out_dir {
            Some(dir) => {
                let name = html
                    .file_name()
                    .ok_or_else(|| anyhow!("input path '{}' has no file name", self.input.display()))?;
                Ok(dir.join(name))
            }
            None => Ok(html),
        }
    }
}

/// Resolve an output path to an absolute one. The file itself need not
/// exist yet, but its directory must.
fn resolve_output(path: &Path) -> Result<PathBuf> {
    if let Ok(existing) = fs::canonicalize(path) {
        return Ok(existing);
    }
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path '{}' has no file name", path.display()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = fs::canonicalize(parent)
        .with_context(|| format!("failed to resolve '{}'", parent.display()))?;
    Ok(dir.join(name))
}

/// How a run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    ValidationFailure,
    SyntaxFailure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::ValidationFailure => ExitCode::from(2),
            Status::SyntaxFailure => ExitCode::from(3),
        }
    }
}

fn run(config: &Config) -> Result<Status> {
    let source = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read '{}'", config.input.display()))?;
    log::debug!("read {} bytes from {}", source.len(), config.input.display());

    let quiz = match quizdoc_core::compile(&source) {
        Ok(quiz) => quiz,
        Err(CompileError::Syntax(e)) => {
            report_syntax_error(config, &source, &e);
            return Ok(Status::SyntaxFailure);
        }
        Err(CompileError::Validation(errors)) => {
            report_validation_errors(config, &errors);
            return Ok(Status::ValidationFailure);
        }
    };

    match config.mode() {
        Mode::Build => cmd_build(config, &quiz)?,
        Mode::Check => cmd_check(config, &quiz),
        Mode::Stats => cmd_stats(config, &quiz)?,
    }

    Ok(Status::Success)
}

// =============================================================================
// Build
// =============================================================================

fn cmd_build(config: &Config, quiz: &Quiz) -> Result<()> {
    let output = config.output_path()?;

    if let Some(dir) = &config.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create '{}'", dir.display()))?;
    }

    // `./quiz.html`, `sub/../quiz.html` and symlinks all name the same file.
    let resolved = resolve_output(&output)?;
    let input = fs::canonicalize(&config.input)
        .with_context(|| format!("failed to resolve '{}'", config.input.display()))?;
    if resolved == input {
        bail!(
            "output would overwrite input '{}'; choose a different output path",
            config.input.display()
        );
    }

    let html = quizdoc_core::render(quiz);
    fs::write(&resolved, &html)
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    log::info!("wrote {} bytes", html.len());

    if config.json {
        println!("{}", serde_json::json!({ "output": resolved.display().to_string() }));
    } else {
        println!("Wrote: {}", resolved.display());
    }
    Ok(())
}

// =============================================================================
// Check
// =============================================================================

fn cmd_check(config: &Config, quiz: &Quiz) {
    if config.json {
        println!(
            "{}",
            serde_json::json!({
                "valid": true,
                "questions": quiz.questions.len(),
                "errors": [],
                "quiz": quiz,
            })
        );
    } else {
        println!("Valid: {} questions", quiz.questions.len());
    }
}

// =============================================================================
// Stats
// =============================================================================

#[derive(Debug, Serialize)]
struct Stats<'q> {
    title: &'q str,
    questions: usize,
    choices: usize,
    per_question: Vec<QuestionStats<'q>>,
}

#[derive(Debug, Serialize)]
struct QuestionStats<'q> {
    id: String,
    text: &'q str,
    choices: usize,
    /// 1-based index of the correct choice.
    correct: Option<usize>,
}

impl<'q> Stats<'q> {
    fn from_quiz(quiz: &'q Quiz) -> Self {
        let per_question = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionStats {
                id: question_id(i + 1),
                text: &q.text,
                choices: q.choices.len(),
                correct: q.choices.iter().position(|c| c.correct).map(|p| p + 1),
            })
            .collect();

        Self {
            title: &quiz.title,
            questions: quiz.questions.len(),
            choices: quiz.choice_count(),
            per_question,
        }
    }
}

fn cmd_stats(config: &Config, quiz: &Quiz) -> Result<()> {
    let stats = Stats::from_quiz(quiz);

    if config.json {
        let json = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
        println!("{}", json);
        return Ok(());
    }

    println!("Quiz: {}", stats.title);
    println!("Questions: {}", stats.questions);
    println!("Choices: {}", stats.choices);
    for q in &stats.per_question {
        println!("  {}: {} choices  {}", q.id, q.choices, q.text);
    }
    Ok(())
}

// =============================================================================
// Diagnostics
// =============================================================================

fn report_syntax_error(config: &Config, source: &str, error: &SyntaxError) {
    if config.json {
        let expected: Vec<_> = error.expected.iter().map(|k| k.describe()).collect();
        println!(
            "{}",
            serde_json::json!({
                "valid": false,
                "kind": "syntax",
                "errors": [{
                    "message": error.message,
                    "line": error.position.line,
                    "column": error.position.column,
                    "expected": expected,
                    "found": error.found,
                }]
            })
        );
        // JSON goes to stdout; keep a summary on the diagnostic stream.
        eprintln!("error: {}: {}", config.input.display(), error);
    } else {
        eprintln!("{}", format_syntax_error(&config.input, source, error));
    }
}

/// Render a syntax error with the offending source line and a caret.
fn format_syntax_error(file: &Path, source: &str, error: &SyntaxError) -> String {
    let line = error.position.line;
    let col = error.position.column;
    let line_text = source
        .lines()
        .nth(line.saturating_sub(1) as usize)
        .unwrap_or("");
    format!(
        "error: {}:{}:{}: {}\n  {}\n  {}^",
        file.display(),
        line,
        col,
        error.message,
        line_text,
        " ".repeat(col.saturating_sub(1) as usize)
    )
}

fn report_validation_errors(config: &Config, errors: &ValidationErrors) {
    if config.json {
        let errors: Vec<_> = errors
            .iter()
            .map(|e| {
                serde_json::json!({
                    "message": e.message,
                    "question": e.question,
                    "found": e.found,
                    "line": e.position.map(|p| p.line),
                    "column": e.position.map(|p| p.column),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({ "valid": false, "kind": "validation", "errors": errors })
        );
        eprintln!(
            "error: {}: {} validation error(s)",
            config.input.display(),
            errors.len()
        );
    } else {
        eprintln!("Validation errors:");
        for error in errors {
            eprintln!(" - {}", error);
        }
    }
}
