//! Configuration options for deck export conversion

use std::fmt;
use std::path::Path;

use crate::deck::IncludeSet;
use crate::error::ConversionResult;
use crate::normalizer::SetCodeTable;
use crate::parser::SourceFormat;

/// Field delimiter for tabular exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterType {
    /// Comma delimiter (,)
    Comma,
    /// Tab delimiter (\\t)
    Tab,
    /// Pipe delimiter (|)
    Pipe,
}

impl DelimiterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelimiterType::Comma => ",",
            DelimiterType::Tab => "\t",
            DelimiterType::Pipe => "|",
        }
    }
}

impl fmt::Display for DelimiterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelimiterType::Comma => write!(f, "comma"),
            DelimiterType::Tab => write!(f, "tab"),
            DelimiterType::Pipe => write!(f, "pipe"),
        }
    }
}

/// Default cap on how much export text is read into memory
pub const DEFAULT_MEMORY_LIMIT: usize = 100 * 1024 * 1024; // 100MB

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Sections of a structured export to render
    pub include: IncludeSet,
    /// Field delimiter for tabular exports
    pub delimiter: DelimiterType,
    /// Force a source format instead of detecting it
    pub format: Option<SourceFormat>,
    /// Set code corrections applied before uppercasing
    pub set_codes: SetCodeTable,
    /// Largest export accepted, in bytes
    pub memory_limit: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            include: IncludeSet::default(),
            delimiter: DelimiterType::Comma,
            format: None,
            set_codes: SetCodeTable::new(),
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Select which structured sections to render
    pub fn with_include(mut self, include: IncludeSet) -> Self {
        self.include = include;
        self
    }

    /// Set tabular delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Force a source format
    pub fn with_format(mut self, format: Option<SourceFormat>) -> Self {
        self.format = format;
        self
    }

    pub fn with_set_codes(mut self, set_codes: SetCodeTable) -> Self {
        self.set_codes = set_codes;
        self
    }

    /// Load set code corrections from a JSON file
    pub fn with_set_code_file(mut self, path: &Path) -> ConversionResult<Self> {
        self.set_codes = SetCodeTable::load(path)?;
        Ok(self)
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if self.include.is_empty() {
            return Err("At least one deck section must be included".to_string());
        }

        Ok(())
    }
}
