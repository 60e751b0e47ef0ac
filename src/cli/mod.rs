//! Command-line interface module

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};

use crate::conversion::config::DEFAULT_MEMORY_LIMIT;
use crate::conversion::{ConversionConfig, ConversionEngine, DelimiterType, MassEntryData};
use crate::deck::IncludeSet;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::{DeckSource, SourceFormat};

pub mod output;

pub use output::write_output;

const TCG_LONG_ABOUT: &str = "\
Convert a Scryfall deck export (CSV or JSON) into text for TCGPlayer's mass entry form.

Known limitations:
  - TCGPlayer mass entry does not accept basic lands. They are listed after the
    mass entry block in a search-friendly form so they can be found by hand.
  - Extended-art printings are not marked in Scryfall exports, so a regular
    printing may be matched instead.
  - A few Scryfall set codes differ from TCGPlayer's. Use --set-codes with a JSON
    object of corrections (e.g. {\"plst\": \"LIST\"}) to remap them.";

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "mtgutil")]
#[command(about = "Utilities for Magic: The Gathering deck exports")]
#[command(version)]
pub struct Args {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Log level implied by `--verbose` / `--quiet`
    pub fn log_level(&self) -> LevelFilter {
        log_level(self.verbose, self.quiet)
    }
}

fn log_level(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a Scryfall deck export into TCGPlayer mass entry text
    #[command(long_about = TCG_LONG_ABOUT)]
    Tcg(TcgArgs),
}

/// Arguments of the `tcg` subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TcgArgs {
    /// Deck export file (CSV or JSON), or `-` for standard input
    #[arg()]
    pub source: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Deck sections to include from JSON exports (default: commanders nonlands lands)
    #[arg(long, value_enum, num_args = 1..)]
    pub include: Vec<SectionArg>,

    /// Export format (default: auto)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// CSV field delimiter: comma, tab, or pipe (default: comma)
    #[arg(long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// JSON file of set code corrections
    #[arg(long)]
    pub set_codes: Option<PathBuf>,

    /// Maximum export size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Read the export from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,
}

/// Deck sections selectable with `--include`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionArg {
    All,
    Commanders,
    Nonlands,
    Outside,
    Lands,
    Maybeboard,
    Sideboard,
}

impl SectionArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionArg::All => "all",
            SectionArg::Commanders => "commanders",
            SectionArg::Nonlands => "nonlands",
            SectionArg::Outside => "outside",
            SectionArg::Lands => "lands",
            SectionArg::Maybeboard => "maybeboard",
            SectionArg::Sideboard => "sideboard",
        }
    }
}

/// Export format selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Auto,
    Csv,
    Json,
}

impl FormatArg {
    /// Forced source format; `None` means detect
    pub fn source_format(self) -> Option<SourceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Csv => Some(SourceFormat::Tabular),
            FormatArg::Json => Some(SourceFormat::Structured),
        }
    }
}

/// Delimiter types for CLI
#[derive(ValueEnum, Debug, Clone)]
pub enum Delimiter {
    #[value(name = "comma", alias = ",")]
    Comma,
    #[value(name = "tab", alias = "\t")]
    Tab,
    #[value(name = "pipe", alias = "|")]
    Pipe,
}

impl From<Delimiter> for DelimiterType {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Comma => DelimiterType::Comma,
            Delimiter::Tab => DelimiterType::Tab,
            Delimiter::Pipe => DelimiterType::Pipe,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: TcgArgs,
    pub conversion_config: ConversionConfig,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let Commands::Tcg(tcg) = args.command;
        let conversion_config = Self::create_conversion_config(&tcg)?;

        Ok(Self {
            args: tcg,
            conversion_config,
            verbose: args.verbose,
            quiet: args.quiet,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &TcgArgs) -> ConversionResult<ConversionConfig> {
        let delimiter = args
            .delimiter
            .clone()
            .map(DelimiterType::from)
            .unwrap_or(DelimiterType::Comma);
        let memory_limit = parse_memory_limit(&args.memory_limit)?;
        let include = if args.include.is_empty() {
            IncludeSet::default()
        } else {
            IncludeSet::from_names(args.include.iter().map(SectionArg::as_str))
        };
        let format = args.format.and_then(FormatArg::source_format);

        let mut config = ConversionConfig::new()
            .with_include(include)
            .with_delimiter(delimiter)
            .with_format(format)
            .with_memory_limit(memory_limit);
        if let Some(path) = &args.set_codes {
            config = config.with_set_code_file(path)?;
        }

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Log level implied by `--verbose` / `--quiet`
    pub fn log_level(&self) -> LevelFilter {
        log_level(self.verbose, self.quiet)
    }

    /// Resolve where the export is read from
    pub fn source(&self) -> ConversionResult<DeckSource> {
        match self.args.source.as_deref() {
            _ if self.args.stdin => Ok(DeckSource::Stdin),
            Some("-") => Ok(DeckSource::Stdin),
            Some(path) => Ok(DeckSource::File(PathBuf::from(path))),
            None => Err(ConversionError::configuration(
                "No input provided. Use --stdin or provide a deck export path",
            )),
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.out {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

/// Run the `tcg` conversion described by `config`
pub fn run(config: &CliConfig) -> CliResult<MassEntryData> {
    let source = config.source()?;
    debug!(
        "Converting {} to {}",
        source.description(),
        config.output_description()
    );

    let engine = ConversionEngine::new(config.conversion_config.clone());
    let result = engine.convert_from_source(&source)?;

    write_output(config.args.out.as_deref(), result.as_str())?;

    if let Some(path) = config.args.out.as_deref().filter(|p| *p != Path::new("-")) {
        CliUtils::show_success(&format!("Converted to: {}", path.display()), config.is_quiet());
    }
    if config.want_stats() && !config.is_quiet() {
        for line in result.stats.report_lines() {
            eprintln!("{}", line);
        }
    }

    Ok(result)
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(DEFAULT_MEMORY_LIMIT);
    };
    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || ConversionError::configuration(format!("Invalid memory limit: {}", limit_str));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Show a success message on stderr (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    match error {
        ConversionError::Conversion {
            kind: ConversionErrorKind::InputTooLarge { .. },
            ..
        } => eprintln!("\nTip: Use --memory-limit to raise the size limit"),
        ConversionError::Conversion {
            kind: ConversionErrorKind::UnknownFormat { .. },
            ..
        } => eprintln!("\nTip: Use --format csv or --format json"),
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'mtgutil tcg --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, ConversionError>;
