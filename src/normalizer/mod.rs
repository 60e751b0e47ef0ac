//! Name and field normalization shared by the tabular and structured pipelines

pub mod rules;
pub mod set_codes;

pub use rules::{
    default_name_rules, strip_collector_number_artifacts, AlternateFaceRule, NameRule,
    TokenSuffixRule,
};
pub use set_codes::{normalize_set_code, SetCodeResolver, SetCodeTable};

use log::debug;

use crate::deck::{is_basic_land, CardEntry, LandCheck, Printing, RawRecord, RecordOrigin};
use crate::error::{ParseError, ParseResult};

/// Turns ingestor output into render-ready [`CardEntry`] values
#[derive(Debug)]
pub struct Normalizer {
    rules: Vec<Box<dyn NameRule>>,
    set_codes: Box<dyn SetCodeResolver>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(SetCodeTable::new())
    }
}

impl Normalizer {
    /// Create a normalizer with the default name rules
    pub fn new(set_codes: impl SetCodeResolver + 'static) -> Self {
        Self {
            rules: default_name_rules(),
            set_codes: Box::new(set_codes),
        }
    }

    /// Append an extra name rule, applied after the existing ones
    pub fn with_rule(mut self, rule: impl NameRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Run every name rule in order
    pub fn normalize_name(&self, name: &str) -> String {
        let mut current = name.to_string();
        for rule in &self.rules {
            let next = rule.apply(&current).into_owned();
            if next != current {
                debug!("{} rule: '{}' -> '{}'", rule.name(), current, next);
                current = next;
            }
        }
        current
    }

    pub fn normalize_set_code(&self, set_code: &str) -> String {
        normalize_set_code(self.set_codes.as_ref(), set_code)
    }

    pub fn normalize_collector_number(&self, collector_number: &str) -> String {
        strip_collector_number_artifacts(collector_number.trim()).into_owned()
    }

    /// Normalize a single record
    pub fn normalize(&self, record: RawRecord) -> ParseResult<CardEntry> {
        if record.count == 0 {
            return Err(locate(
                ParseError::malformed_record("card count must be at least 1"),
                &record.origin,
            )
            .with_field("count"));
        }

        let name = self.normalize_name(&record.name);
        if name.trim().is_empty() {
            return Err(locate(
                ParseError::malformed_record(format!(
                    "card name '{}' is empty after normalization",
                    record.name
                )),
                &record.origin,
            )
            .with_field("name"));
        }

        let is_basic_land = match record.land_check {
            LandCheck::RawName => is_basic_land(&record.name),
            LandCheck::NormalizedName => is_basic_land(&name),
        };

        // Lands always keep their printing for the search-friendly appendix
        let printing = if is_basic_land || record.printing_specified {
            record.printing.map(|printing| Printing {
                set_code: self.normalize_set_code(&printing.set_code),
                collector_number: self.normalize_collector_number(&printing.collector_number),
            })
        } else {
            None
        };

        let art_label = if is_basic_land {
            record.art_label.map(|label| label.trim().to_string())
        } else {
            None
        };

        Ok(CardEntry {
            count: record.count,
            name,
            printing,
            is_basic_land,
            art_label,
        })
    }

    /// Normalize records in order, stopping at the first defect
    pub fn normalize_all(&self, records: Vec<RawRecord>) -> ParseResult<Vec<CardEntry>> {
        records
            .into_iter()
            .map(|record| self.normalize(record))
            .collect()
    }
}

/// Attach record origin details to a parse error
pub(crate) fn locate(mut error: ParseError, origin: &RecordOrigin) -> ParseError {
    if let Some(section) = &origin.section {
        error = error.with_section(section.clone());
    }
    if origin.index > 0 {
        error = error.with_record(origin.index);
    }
    if let Some(line) = origin.line {
        error = error.with_line(line);
    }
    error
}
