//! Error types and handling infrastructure for deck export conversion

use std::fmt;
use std::path::PathBuf;

/// Core error kinds for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Unrecognized source format: {message}")]
    UnknownFormat { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn unknown_format(message: String) -> Self {
        Self::UnknownFormat { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    /// Wrap an I/O failure on `path`
    pub fn io(path: Option<PathBuf>, err: std::io::Error) -> Self {
        let message = match &path {
            Some(p) => format!("{}: {}", p.display(), err),
            None => err.to_string(),
        };
        Self::conversion_with_source(ConversionErrorKind::io(message, path), err.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::conversion(ConversionErrorKind::configuration(message.into()))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => match err.kind {
                ParseErrorKind::Schema => format!("Schema error: {}", err),
                ParseErrorKind::MalformedRecord => format!("Malformed record: {}", err),
                ParseErrorKind::MalformedDocument => format!("Malformed document: {}", err),
            },
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!(
                        "Deck export too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                _ => self.to_string(),
            },
        }
    }
}

/// Categories of input defects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required column or key is absent
    Schema,
    /// A row or entry could not be parsed into the expected fields
    MalformedRecord,
    /// The document as a whole is not parseable
    MalformedDocument,
}

/// Parsing errors with enough context to locate the offending record
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// 1-based record index (data rows for tabular input, entries within a section otherwise)
    pub record: Option<usize>,
    /// 1-based line in the source text
    pub line: Option<usize>,
    pub field: Option<String>,
    pub section: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            record: None,
            line: None,
            field: None,
            section: None,
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Schema, message)
    }

    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MalformedRecord, message)
    }

    pub fn malformed_document(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MalformedDocument, message)
    }

    pub fn with_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        let mut context = Vec::new();
        if let Some(section) = &self.section {
            context.push(format!("section '{}'", section));
        }
        if let Some(record) = self.record {
            context.push(format!("record {}", record));
        }
        if let Some(line) = self.line {
            context.push(format!("line {}", line));
        }
        if let Some(field) = &self.field {
            context.push(format!("field '{}'", field));
        }
        if !context.is_empty() {
            write!(f, " ({})", context.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
