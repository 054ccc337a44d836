// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use imsc_convert::app_config::{self, Config};
use imsc_convert::language_utils;
use imsc_convert::srt;
use imsc_convert::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert SRT or JSON subtitles to IMSC 1.0 documents
    Write(WriteArgs),

    /// Load an IMSC document and print its paragraphs
    Read(ReadArgs),

    /// Generate shell completions for imsc-convert
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct WriteArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document title (defaults to the input file name)
    #[arg(long)]
    title: Option<String>,

    /// Document language code (e.g., 'en', 'fr', 'pt-BR')
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Parser, Debug)]
struct ReadArgs {
    /// IMSC document to load
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Print the loaded subtitle as JSON
    #[arg(long, conflicts_with = "srt")]
    json: bool,

    /// Print the loaded subtitle as plain SRT
    #[arg(long)]
    srt: bool,
}

/// imsc-convert - IMSC 1.0 subtitle converter
#[derive(Parser, Debug)]
#[command(name = "imsc-convert")]
#[command(version)]
#[command(about = "Convert subtitles to and from IMSC 1.0 (TTML) documents")]
#[command(long_about = "imsc-convert writes IMSC 1.0 Text Profile documents from SRT or JSON subtitles and reads them back.

EXAMPLES:
    imsc-convert write movie.srt                  # Writes movie.imsc.xml
    imsc-convert write -o out/ subtitles/         # Convert a whole directory
    imsc-convert write --title \"Pilot\" -l fr ep1.srt
    imsc-convert read movie.imsc.xml              # Print paragraphs as SRT
    imsc-convert read --json movie.imsc.xml       # Print paragraphs as JSON
    imsc-convert read --srt movie.imsc.xml > movie.srt
    imsc-convert completions bash > imsc-convert.bash

CONFIGURATION:
    Configuration is read from imsc.json by default. You can specify a different
    file with --config-path. Defaults are used when the file doesn't exist.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "imsc.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of existing output files
    #[arg(short, long, global = true)]
    force_overwrite: bool,
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
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
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
    // The logger accepts everything; the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "imsc-convert", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Write(args) => run_write(config, args, cli.force_overwrite),
        Commands::Read(args) => run_read(config, args),
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        info!("Config file not found at '{}', using defaults.", config_path);
        return Ok(Config::default());
    }

    let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;
    let reader = BufReader::new(file);
    let config: Config = serde_json::from_reader(reader)
        .context(format!("Failed to parse config file: {}", config_path))?;

    Ok(config)
}

fn run_write(mut config: Config, args: WriteArgs, force_overwrite: bool) -> Result<()> {
    if let Some(language) = &args.language {
        // Tags with a region subtag are kept as given
        config.imsc.default_language = if language.contains(['-', '_']) {
            language.clone()
        } else {
            language_utils::normalize_to_part1_or_part2t(language)
                .with_context(|| format!("Invalid language: {}", language))?
        };
    }

    let controller = Controller::with_config(config)?;
    let output_dir = args.output_dir.as_deref();
    let title = args.title.as_deref();

    if args.input_path.is_file() {
        if controller
            .run(&args.input_path, output_dir, title, force_overwrite)?
            .is_none()
        {
            warn!("Nothing written, use --force-overwrite to replace existing output");
        }
    } else if args.input_path.is_dir() {
        controller.run_folder(&args.input_path, output_dir, title, force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_read(config: Config, args: ReadArgs) -> Result<()> {
    let controller = Controller::with_config(config)?;
    let subtitle = controller
        .read_document(&args.input_path)
        .with_context(|| format!("Failed to read {:?}", args.input_path))?;

    let mut stdout = std::io::stdout();
    if args.json {
        let json = serde_json::to_string_pretty(&subtitle).context("Failed to serialize subtitle to JSON")?;
        writeln!(stdout, "{}", json)?;
    } else if args.srt {
        write!(stdout, "{}", srt::to_srt_string(&subtitle))?;
    } else {
        write!(stdout, "{}", controller.describe(&subtitle))?;
    }

    Ok(())
}
