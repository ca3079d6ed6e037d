// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use termtip::app_config::{self, Config, FetchSource};
use termtip::{Readiness, SiteProcessor, TooltipMarkup};

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

/// CLI Wrapper for TooltipMarkup to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMarkup {
    Inline,
    Block,
}

impl From<CliMarkup> for TooltipMarkup {
    fn from(cli_markup: CliMarkup) -> Self {
        match cli_markup {
            CliMarkup::Inline => TooltipMarkup::Inline,
            CliMarkup::Block => TooltipMarkup::Block,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add glossary tooltips to an HTML page or a whole build directory
    Augment(AugmentArgs),

    /// Generate shell completions for termtip
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AugmentArgs {
    /// HTML page or documentation build directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (page input) or directory (directory input); defaults to stdout or in-place
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Build directory a single page belongs to (defaults to the page's directory)
    #[arg(long)]
    site_root: Option<PathBuf>,

    /// Fetch glossary pages over HTTP from this site URL instead of the build directory
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// URL the build directory is served at, used to resolve links
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,

    /// Element names of injected tooltips
    #[arg(short, long, value_enum)]
    markup: Option<CliMarkup>,

    /// Delay before the pass starts, in milliseconds
    #[arg(short, long)]
    delay_ms: Option<u64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// termtip - glossary term tooltips for rendered documentation
///
/// Finds glossary term references in rendered HTML, looks up each term's
/// definition in the linked glossary page and appends a hover tooltip.
#[derive(Parser, Debug)]
#[command(name = "termtip")]
#[command(version)]
#[command(about = "Glossary term tooltips for rendered documentation")]
#[command(long_about = "termtip finds glossary term references in rendered HTML documentation, fetches the linked glossary page for each one and appends a tooltip with the term's definition.

EXAMPLES:
    termtip augment build/html                          # Augment every page in place
    termtip augment build/html -o build/html-tips       # Mirror augmented pages into another directory
    termtip augment build/html/guide.html -o guide.html # Augment a single page
    termtip augment page.html --origin https://docs.example.com/  # Read glossaries from the live site
    termtip completions bash > termtip.bash             # Generate bash completions

CONFIGURATION:
    Configuration is read from conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: ANSI color code for log level
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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

#[tokio::main]
async fn main() -> Result<()> {
    // Logger starts at trace; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termtip", &mut std::io::stdout());
            Ok(())
        }
        Commands::Augment(args) => run_augment(args).await,
    }
}

fn load_config(options: &AugmentArgs) -> Result<Config> {
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', using defaults.", config_path);
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(origin) = &options.origin {
        config.site_url = origin.clone();
        config.fetch.source = FetchSource::Http;
    } else if let Some(site_url) = &options.site_url {
        config.site_url = site_url.clone();
    }

    if let Some(markup) = &options.markup {
        config.tooltip_markup = markup.clone().into();
    }

    if let Some(delay_ms) = options.delay_ms {
        config.startup_delay_ms = delay_ms;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

async fn run_augment(options: AugmentArgs) -> Result<()> {
    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let readiness = Readiness::Delay(config.startup_delay());

    if options.input_path.is_file() {
        let site_root = options.site_root.clone().unwrap_or_else(|| {
            options
                .input_path
                .parent()
                .unwrap_or(Path::new(""))
                .to_path_buf()
        });
        let processor = SiteProcessor::new(&config, site_root)?;
        processor
            .run_file(&options.input_path, options.output.as_deref(), readiness)
            .await?;
    } else if options.input_path.is_dir() {
        if options.site_root.is_some() {
            warn!("--site-root is ignored for directory input");
        }
        let processor = SiteProcessor::new(&config, options.input_path.clone())?;
        processor
            .run_dir(options.output.as_deref(), readiness)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
