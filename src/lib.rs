//! Scryfall deck export to TCGPlayer mass entry converter
//!
//! Reads a deck exported from Scryfall, either as CSV or as the JSON
//! document with an `entries` object, and renders the text accepted by
//! TCGPlayer's mass entry form. Basic lands, which mass entry rejects, are
//! listed after a banner in a search-friendly form.

pub mod cli;
pub mod conversion;
pub mod deck;
pub mod error;
pub mod formatter;
pub mod normalizer;
pub mod parser;

// Re-export commonly used types
pub use conversion::{
    convert_deck, convert_deck_from_source, ConversionConfig, ConversionEngine, ConversionStats,
    DelimiterType, MassEntryData,
};
pub use deck::{CardEntry, IncludeSet, Printing, RawRecord};
pub use error::{ConversionError, ConversionErrorKind, ConversionResult, ParseError, ParseErrorKind};
pub use formatter::{format_mass_entry, OutputDocument};
pub use normalizer::{Normalizer, SetCodeResolver, SetCodeTable};
pub use parser::{DeckSource, SourceFormat};

/// Convert export text to mass entry text with default configuration
pub fn convert_export(content: &str, format: SourceFormat) -> Result<String, ConversionError> {
    let config = ConversionConfig::default();
    convert_export_with_config(content, format, &config)
}

/// Convert export text to mass entry text with custom configuration
pub fn convert_export_with_config(
    content: &str,
    format: SourceFormat,
    config: &ConversionConfig,
) -> Result<String, ConversionError> {
    let result = convert_deck(content, format, config)?;
    Ok(result.content)
}
