use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use magnitude_scale::{AnalysisMode, Analyzer, AnalyzerConfig, ScaleDictionary};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

mod models;
mod report;

use models::AnalysisReport;

const DICTIONARY_ENV: &str = "MAGNITUDE_DICTIONARY";

#[derive(Parser)]
#[command(name = "magnitude")]
#[command(about = "Find the largest scaled number in a document", long_about = None)]
#[command(version)]
struct Cli {
    /// PDF or .txt file to analyze
    path: PathBuf,

    /// How scale cues are applied
    #[arg(long, value_enum, default_value_t = ModeFlag::Contextual)]
    mode: ModeFlag,

    /// Number of ranked values to report
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Characters of context inspected on each side of a number
    #[arg(long, default_value_t = 50)]
    window: usize,

    /// Largest exponent evaluated for scientific and power notation
    #[arg(long, default_value_t = 1000)]
    max_exponent: u32,

    /// Characters analyzed before the rest of the input is ignored
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    max_input_chars: usize,

    /// Scale dictionary TOML file (overrides MAGNITUDE_DICTIONARY)
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeFlag {
    Contextual,
    Literal,
}

impl From<ModeFlag> for AnalysisMode {
    fn from(flag: ModeFlag) -> Self {
        match flag {
            ModeFlag::Contextual => AnalysisMode::Contextual,
            ModeFlag::Literal => AnalysisMode::Literal,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

/// Parse arguments, analyze one document and print the report.
///
/// Logs go to stderr; JSON output forces warn-level logging so stdout
/// stays a single parseable document.
pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for the JSON document
    let quiet = cli.quiet || cli.format == OutputFormat::Json;
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = AnalyzerConfig {
        mode: cli.mode.into(),
        window_chars: cli.window,
        top_n: cli.top,
        max_exponent: cli.max_exponent,
        max_input_chars: cli.max_input_chars,
    };
    let dictionary = load_dictionary(cli.dictionary.as_deref())?;
    let analyzer =
        Analyzer::with_dictionary(config, dictionary).context("Invalid analysis settings")?;

    let document = magnitude_document::extract_text(&cli.path)
        .with_context(|| format!("Failed to read {}", cli.path.display()))?;
    if document.page_errors > 0 {
        log::warn!(
            "{} page(s) of {} could not be extracted",
            document.page_errors,
            cli.path.display()
        );
    }
    log::info!(
        "Analyzing {} page(s) from {}",
        document.pages.len(),
        cli.path.display()
    );

    let result = analyzer.analyze_pages(&document.pages);
    let report = AnalysisReport::new(&cli.path, analyzer.config(), &document, &result);

    let output = match cli.format {
        OutputFormat::Text => report::render_text(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Markdown => report::render_markdown(&report),
    };
    print_stdout(&output)
}

fn load_dictionary(flag: Option<&Path>) -> Result<ScaleDictionary> {
    let path = flag
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(DICTIONARY_ENV).map(PathBuf::from));
    match path {
        Some(path) => ScaleDictionary::load(&path)
            .with_context(|| format!("Failed to load scale dictionary {}", path.display())),
        None => Ok(ScaleDictionary::builtin()),
    }
}
