//! Core conversion engine for deck export to mass entry transformation

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::stats::ConversionStats;
use crate::deck::CardEntry;
use crate::error::{ConversionError, ConversionResult};
use crate::formatter::OutputDocument;
use crate::normalizer::Normalizer;
use crate::parser::{DeckIngestor, DeckSource, SourceFormat, StructuredIngestor, TabularIngestor};
use log::{debug, info};
use std::time::Instant;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct MassEntryData {
    pub content: String,
    pub entries: Vec<CardEntry>,
    pub document: OutputDocument,
    pub stats: ConversionStats,
}

impl MassEntryData {
    /// Get the rendered mass entry text
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Main conversion engine
#[derive(Debug)]
pub struct ConversionEngine {
    config: ConversionConfig,
    normalizer: Normalizer,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        let normalizer = Normalizer::new(config.set_codes.clone());
        Self { config, normalizer }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Ingestor for `format`, configured from this engine's settings
    pub fn ingestor(&self, format: SourceFormat) -> Box<dyn DeckIngestor> {
        match format {
            SourceFormat::Tabular => Box::new(TabularIngestor::new(self.config.delimiter)),
            SourceFormat::Structured => {
                Box::new(StructuredIngestor::new(self.config.include.clone()))
            }
        }
    }

    /// Convert export text of a known format
    pub fn convert_str(&self, content: &str, format: SourceFormat) -> ConversionResult<MassEntryData> {
        let start_time = Instant::now();
        limits::check_content_size(content, &self.config)?;

        let ingestor = self.ingestor(format);
        debug!("Reading {} export ({} bytes)", ingestor.format(), content.len());
        let report = ingestor
            .read_records(content)
            .map_err(ConversionError::ParseError)?;

        let entries = self
            .normalizer
            .normalize_all(report.records.clone())
            .map_err(ConversionError::ParseError)?;

        let document = OutputDocument::from_entries(&entries);
        let rendered = document.render();

        let stats = ConversionStats::collect(
            format,
            &report,
            &entries,
            content.len(),
            rendered.len(),
            start_time.elapsed(),
        );
        info!("{}", stats.summary());

        Ok(MassEntryData {
            content: rendered,
            entries,
            document,
            stats,
        })
    }

    /// Convert a deck export from a source, detecting its format
    pub fn convert_from_source(&self, source: &DeckSource) -> ConversionResult<MassEntryData> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;

        let content = source.read_content()?;
        let format = source.resolve_format(self.config.format, &content)?;
        debug!("Treating {} as a {} export", source.description(), format);

        self.convert_str(&content, format)
    }
}

/// Convert export text with the given configuration
pub fn convert_deck(
    content: &str,
    format: SourceFormat,
    config: &ConversionConfig,
) -> ConversionResult<MassEntryData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_str(content, format)
}

/// Convert a deck export from a source with the given configuration
pub fn convert_deck_from_source(
    source: &DeckSource,
    config: &ConversionConfig,
) -> ConversionResult<MassEntryData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_from_source(source)
}
