//! Set code correction table.
//!
//! Scryfall and TCGPlayer disagree on some set codes. No corrections are
//! built in; a table can be supplied as a JSON object of `"code": "CODE"` pairs.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::debug;

use crate::error::{ConversionError, ConversionResult};

/// Maps an exported set code to the code the mass entry tool expects
pub trait SetCodeResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, set_code: &str) -> Option<&str>;
}

/// Case-insensitive lookup table of set code corrections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCodeTable {
    entries: HashMap<String, String>,
}

impl SetCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: impl AsRef<str>, to: impl Into<String>) {
        self.entries
            .insert(from.as_ref().trim().to_lowercase(), to.into());
    }

    pub fn with_entry(mut self, from: impl AsRef<str>, to: impl Into<String>) -> Self {
        self.insert(from, to);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON object of code corrections
    pub fn from_json_str(content: &str) -> ConversionResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(content).map_err(|e| {
            ConversionError::configuration(format!("Invalid set code table: {}", e))
        })?;

        let mut table = Self::new();
        for (from, to) in raw {
            if to.trim().is_empty() {
                return Err(ConversionError::configuration(format!(
                    "Set code table maps '{}' to an empty code",
                    from
                )));
            }
            table.insert(from, to.trim());
        }
        Ok(table)
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> ConversionResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConversionError::io(Some(path.to_path_buf()), e))?;
        let table = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} set code corrections from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

impl SetCodeResolver for SetCodeTable {
    fn resolve(&self, set_code: &str) -> Option<&str> {
        self.entries
            .get(&set_code.trim().to_lowercase())
            .map(String::as_str)
    }
}

/// Apply any correction, then uppercase
pub fn normalize_set_code(resolver: &dyn SetCodeResolver, set_code: &str) -> String {
    let set_code = set_code.trim();
    resolver.resolve(set_code).unwrap_or(set_code).to_uppercase()
}
