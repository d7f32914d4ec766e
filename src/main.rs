// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use localesync::app_config::{self, Config, TranslationProvider};
use localesync::app_controller::{Controller, RunReport, VariantUpdateOptions};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Gemini,
    Anthropic,
    Ollama,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

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
    /// Translate every source file into the languages that do not have it yet
    Translate,

    /// Resync target files of source files changed since the last commit
    Update {
        /// Retranslate whole files instead of their git diff
        #[arg(short, long)]
        force: bool,

        /// Only this source file (e.g. common.json)
        #[arg(long)]
        file: Option<String>,
    },

    /// Resync variant content translations
    Variants {
        /// Only this tool
        #[arg(short, long)]
        tool: Option<String>,

        /// Only this variant
        #[arg(short, long)]
        variant: Option<String>,

        /// A single variant file; tool and variant are derived from it
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Retranslate whole variants instead of their git diff
        #[arg(short, long)]
        force: bool,

        /// Translate every variant missing in a language
        #[arg(long, conflicts_with_all = ["tool", "variant", "path", "force"])]
        all: bool,
    },

    /// Translate keys that committed target files are missing
    Fix {
        /// Only this source file (e.g. common.json)
        #[arg(value_name = "FILE")]
        file: Option<String>,
    },

    /// List static page paths of every tool, variant and locale
    Paths,

    /// Show variant content statistics
    Stats,

    /// Generate shell completions for localesync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// localesync - keep JSON locale files in sync with an AI translator
///
/// Sends only the changed part of each English locale file to an LLM and
/// deep-merges the result into every translated locale.
#[derive(Parser, Debug)]
#[command(name = "localesync")]
#[command(version)]
#[command(about = "AI-powered locale file synchronization")]
#[command(long_about = "localesync keeps translated JSON locale files in sync with the English source files.

EXAMPLES:
    localesync translate                        # Translate files missing in any language
    localesync update                           # Resync files changed since HEAD
    localesync update --force --file common.json
    localesync fix common.json                  # Fill keys missing in committed translations
    localesync variants -t ai-anime-generator   # Resync one tool's variants
    localesync variants --all                   # Translate all missing variant files
    localesync -l ja -l ko update               # Only Japanese and Korean
    localesync completions bash > localesync.bash

CONFIGURATION:
    Configuration is stored in localesync.json by default. If the config file
    doesn't exist, a default one will be created automatically. API keys can
    also be supplied via LOCALESYNC_API_KEY or the provider's own variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "localesync.json", global = true)]
    config: PathBuf,

    /// Project root the configured paths are relative to
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(long, value_enum, global = true)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Target language (repeatable); overrides the configured list
    #[arg(short, long = "lang", global = true)]
    lang: Vec<String>,
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace lets set_max_level raise the level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "localesync", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config)?;

    // Override config with CLI options if provided
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &cli.model {
        config.translation.set_model(model);
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let needs_provider = !matches!(cli.command, Commands::Paths | Commands::Stats);
    if needs_provider {
        config.validate().context("Configuration validation failed")?;
    }

    let controller = Controller::with_config(config, cli.root.clone())?.with_languages(cli.lang.clone());

    let report = match cli.command {
        Commands::Translate => controller.run_translate_missing().await?,
        Commands::Update { force, file } => controller.run_update(force, file.as_deref()).await?,
        Commands::Variants {
            all: true, ..
        } => controller.run_variants_translate_all().await?,
        Commands::Variants {
            tool,
            variant,
            path,
            force,
            ..
        } => {
            let options = VariantUpdateOptions {
                tool,
                variant,
                path,
                force,
            };
            controller.run_variants_update(&options).await?
        }
        Commands::Fix { file } => controller.run_fix(file.as_deref()).await?,
        Commands::Paths => {
            for path in controller.static_paths()? {
                match &path.locale {
                    Some(locale) => println!("/{}/{}/{}", locale, path.tool, path.variant),
                    None => println!("/{}/{}", path.tool, path.variant),
                }
            }
            return Ok(());
        }
        Commands::Stats => {
            let stats = controller.loader_stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }
        Commands::Completions { .. } => return Ok(()),
    };

    print_report(&report);
    info!("{}", controller.translator().stats().summary());
    Ok(())
}

fn print_report(report: &RunReport) {
    if report.is_clean() {
        info!("Done: {} written, {} skipped", report.written, report.skipped);
    } else {
        info!(
            "Done with {} failures ({} written, {} skipped); see {}",
            report.failures,
            report.written,
            report.skipped,
            localesync::app_controller::ISSUES_LOG_FILE
        );
    }
}
