use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::DeckSource;

/// Check the source size before reading the export into memory.
/// Sources of unknown size (stdin) are checked after reading.
pub fn check_source_size_before_read(
    source: &DeckSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    if let Some(size) = source.estimated_size() {
        check_size(size as usize, config)?;
    }
    Ok(())
}

/// Check export text that has already been read
pub fn check_content_size(content: &str, config: &ConversionConfig) -> ConversionResult<()> {
    check_size(content.len(), config)
}

fn check_size(size: usize, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size,
                limit: config.memory_limit,
            },
        ));
    }
    Ok(())
}
