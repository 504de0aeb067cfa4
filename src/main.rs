// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::chapter::RawDocument;
use crate::segmenter::Segmenter;

mod app_config;
mod chapter;
mod classifier;
mod enrichment;
mod errors;
mod ladder;
mod normalizer;
mod segmenter;
mod titles;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for chapterize
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// chapterize - heuristic chapter segmentation
///
/// Reads a raw text file (scraped page soup or a flat novel upload), splits
/// it into chapters and writes the chapter records as JSON.
#[derive(Parser, Debug)]
#[command(name = "chapterize")]
#[command(version = "0.1.0")]
#[command(about = "Split raw novel text into structured chapters")]
#[command(long_about = "chapterize turns raw, frequently malformed text into an ordered \
sequence of chapter records (title, body, derived metadata).

EXAMPLES:
    chapterize book.txt                      # Segment a local file, JSON to stdout
    chapterize book.txt -o chapters.json     # Write the records to a file
    chapterize - < page.html                 # Read raw content from stdin
    chapterize --pretty book.txt             # Human-readable JSON
    chapterize --log-level debug book.txt    # Narrate every ladder decision
    chapterize completions bash              # Generate shell completions

CONFIGURATION:
    Thresholds are read from conf.json when present (see --config-path); the
    built-in defaults carry the tuned values for web-novel content.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file to segment, or '-' for stdin
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write the JSON chapter records here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Opaque document id used for log correlation
    #[arg(short, long)]
    doc_id: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::from_file_or_default(&cli.config_path)?;

    let level = cli
        .log_level
        .map(LevelFilter::from)
        .unwrap_or_else(|| level_filter_for(&config.log_level));
    log::set_max_level(level);

    let input_path = cli
        .input_path
        .ok_or_else(|| anyhow!("No input path provided, see --help"))?;

    let raw = if input_path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&input_path)
            .with_context(|| format!("Failed to read input file: {}", input_path.display()))?
    };

    let segmenter = Segmenter::new(config.segmentation.clone());
    let chapters = match &cli.doc_id {
        Some(id) => segmenter.segment_document(&RawDocument::new(id.clone(), raw)),
        None => segmenter.segment(&raw),
    };

    info!("Produced {} chapters", chapters.len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&chapters)?
    } else {
        serde_json::to_string(&chapters)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Chapter records written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
