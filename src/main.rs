// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};

use srtalign::app_config::{Config, ConfigOverrides, LogLevel};
use srtalign::app_controller::Controller;
use srtalign::output::OutputFormat;
use srtalign::subtitle_processor::TimestampPolicy;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputFormat {
    Ranges,
    Json,
    Ffmpeg,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Ranges => OutputFormat::Ranges,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Ffmpeg => OutputFormat::Ffmpeg,
        }
    }
}

/// CLI Wrapper for TimestampPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTimestampPolicy {
    Strict,
    Lenient,
}

impl From<CliTimestampPolicy> for TimestampPolicy {
    fn from(cli_policy: CliTimestampPolicy) -> Self {
        match cli_policy {
            CliTimestampPolicy::Strict => TimestampPolicy::Strict,
            CliTimestampPolicy::Lenient => TimestampPolicy::Lenient,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align transcript lines against a subtitle track
    Align(AlignArgs),

    /// Turn a list of time ranges into ffmpeg clip commands
    Clips(ClipsArgs),

    /// Generate shell completions for srtalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Subtitle track (SRT)
    #[arg(value_name = "SUBTITLES")]
    subtitles: PathBuf,

    /// Transcript lines to align, one per line
    #[arg(value_name = "LINES")]
    lines: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Media file clips are cut from (ffmpeg format)
    #[arg(short, long)]
    media: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Handling of malformed timestamp lines
    #[arg(short, long, value_enum)]
    policy: Option<CliTimestampPolicy>,

    /// Margin added around each clip, in milliseconds
    #[arg(long)]
    slop_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct ClipsArgs {
    /// File of `START --> END [¶] comment` lines
    #[arg(value_name = "RANGES")]
    ranges: PathBuf,

    /// Media file clips are cut from
    #[arg(short, long)]
    media: PathBuf,

    /// Write commands here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Margin added around each clip, in milliseconds
    #[arg(long)]
    slop_ms: Option<u64>,
}

/// srtalign - find where transcript lines are spoken in a subtitle track
#[derive(Parser, Debug)]
#[command(name = "srtalign")]
#[command(version)]
#[command(about = "Align transcript lines with subtitle timings")]
#[command(long_about = "srtalign matches each line of a transcript against the text of a subtitle
track and reports the time range the line is spoken in.

EXAMPLES:
    srtalign align movie.de.srt lines.txt                   # Print START --> END line
    srtalign align -f json movie.de.srt lines.txt           # JSON records
    srtalign align -f ffmpeg -m movie.mp3 movie.de.srt lines.txt
    srtalign clips -m movie.mp3 ranges.txt                  # ffmpeg commands from ranges
    srtalign completions bash > srtalign.bash

CONFIGURATION:
    Settings are read from srtalign.json by default. You can specify a different
    file with --config. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "srtalign.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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

    // @returns: ANSI color code and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    let log_level = cli.log_level.map(LogLevel::from);
    if let Some(level) = log_level {
        log::set_max_level(level.to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtalign", &mut std::io::stdout());
            Ok(())
        }
        Commands::Align(args) => {
            let overrides = ConfigOverrides {
                timestamp_policy: args.policy.map(Into::into),
                slop_ms: args.slop_ms,
                format: args.format.map(Into::into),
                log_level,
            };
            let config = load_config(&cli.config_path, &overrides)?;

            let controller = Controller::with_config(config)?;
            let report = controller.run(&args.subtitles, &args.lines, args.media, args.output.as_deref())?;
            if !report.is_complete() {
                warn!(
                    "{} of {} line(s) could not be aligned",
                    report.skipped.len(),
                    report.total()
                );
            }
            Ok(())
        }
        Commands::Clips(args) => {
            let overrides = ConfigOverrides {
                slop_ms: args.slop_ms,
                log_level,
                ..ConfigOverrides::default()
            };
            let config = load_config(&cli.config_path, &overrides)?;

            let controller = Controller::with_config(config)?;
            let count = controller.run_clips(&args.ranges, args.media, args.output.as_deref())?;
            info!("Done: {} clip(s)", count);
            Ok(())
        }
    }
}

// Load the config file, apply command line values, then the resulting log level
fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_overrides(overrides);
    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}
