//! Deck export sources and the ingestors that read them

pub mod structured;
pub mod tabular;

pub use structured::{parse_document, StructuredDeck, StructuredIngestor};
pub use tabular::{repair_split_name, RepairedName, TabularHeader, TabularIngestor};

use crate::deck::RawRecord;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult, ParseResult};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Layout of a deck export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row
    Tabular,
    /// JSON document with an `entries` object
    Structured,
}

impl SourceFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceFormat::Tabular),
            "json" => Some(SourceFormat::Structured),
            _ => None,
        }
    }

    /// Guess the format from the content itself
    pub fn sniff(content: &str) -> Option<Self> {
        let first = content
            .trim_start_matches('\u{feff}')
            .chars()
            .find(|c| !c.is_whitespace())?;
        if first == '{' {
            Some(SourceFormat::Structured)
        } else {
            Some(SourceFormat::Tabular)
        }
    }

    /// Extension first, then content
    pub fn detect(path: Option<&Path>, content: &str) -> Option<Self> {
        path.and_then(Self::from_path)
            .or_else(|| Self::sniff(content))
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Tabular => write!(f, "tabular"),
            SourceFormat::Structured => write!(f, "structured"),
        }
    }
}

/// Where the deck export comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DeckSource {
    /// Export text already in memory
    String(String),
    /// Export file on disk
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl DeckSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            DeckSource::String(_) => "string input".to_string(),
            DeckSource::File(path) => format!("file: {}", path.display()),
            DeckSource::Stdin => "standard input".to_string(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            DeckSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Get the size of the source in bytes, if known before reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            DeckSource::String(s) => Some(s.len() as u64),
            DeckSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            DeckSource::Stdin => None,
        }
    }

    /// Read the whole export into memory
    pub fn read_content(&self) -> ConversionResult<String> {
        match self {
            DeckSource::String(content) => Ok(content.clone()),
            DeckSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| ConversionError::io(Some(path.clone()), e)),
            DeckSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ConversionError::io(None, e))?;
                Ok(buffer)
            }
        }
    }

    /// Resolve the format, honouring an explicit choice
    pub fn resolve_format(
        &self,
        forced: Option<SourceFormat>,
        content: &str,
    ) -> ConversionResult<SourceFormat> {
        forced
            .or_else(|| SourceFormat::detect(self.path(), content))
            .ok_or_else(|| {
                ConversionError::conversion(ConversionErrorKind::unknown_format(format!(
                    "cannot tell whether {} is a CSV or JSON export; pass --format",
                    self.description()
                )))
            })
    }
}

/// Everything an ingestor extracted from one export
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub records: Vec<RawRecord>,
    pub deck_name: Option<String>,
    pub sections_included: Vec<String>,
    pub sections_skipped: Vec<String>,
    pub placeholders_skipped: usize,
    /// Tabular names rejoined after delimiter splitting
    pub names_repaired: usize,
}

/// Reads one export format into the common record shape
pub trait DeckIngestor {
    fn format(&self) -> SourceFormat;

    fn read_records(&self, content: &str) -> ParseResult<IngestReport>;
}
