//! Structured (JSON) deck export ingestion

use log::debug;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::deck::{DeckSection, IncludeSet, LandCheck, Printing, RawRecord, RecordOrigin};
use crate::error::{ParseError, ParseResult};
use crate::parser::{DeckIngestor, IngestReport, SourceFormat};

pub const ENTRIES_KEY: &str = "entries";

/// Top-level export document; unrelated keys are ignored
#[derive(Debug, Deserialize)]
struct DeckDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    entries: Option<Value>,
}

/// One deck entry as exported. Keys are optional here so that an absent
/// key can be reported as a schema error rather than a type error.
#[derive(Debug, Deserialize)]
struct DeckEntry {
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    printing_specified: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_present")]
    card_digest: Option<Option<CardDigest>>,
}

#[derive(Debug, Deserialize)]
struct CardDigest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    set: Option<String>,
    #[serde(default)]
    collector_number: Option<String>,
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent key (`None`)
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A parsed export, restricted to the included sections
#[derive(Debug, Clone, Default)]
pub struct StructuredDeck {
    pub name: Option<String>,
    pub sections: Vec<DeckSection>,
    pub skipped_sections: Vec<String>,
    /// Blank deck slots exported with a `null` digest
    pub placeholders: usize,
}

/// Parse a structured export, keeping sections selected by `include`
pub fn parse_document(content: &str, include: &IncludeSet) -> ParseResult<StructuredDeck> {
    let content = content.trim_start_matches('\u{feff}');
    let document: DeckDocument = serde_json::from_str(content).map_err(|e| {
        let mut err = ParseError::malformed_document(format!("invalid JSON: {}", e));
        if e.line() > 0 {
            err = err.with_line(e.line());
        }
        err
    })?;

    let entries = document.entries.ok_or_else(|| {
        ParseError::schema(format!("missing required key '{}'", ENTRIES_KEY)).with_field(ENTRIES_KEY)
    })?;
    let entries = match entries {
        Value::Object(map) => map,
        other => {
            return Err(ParseError::malformed_document(format!(
                "'{}' must map section names to entry lists, found {}",
                ENTRIES_KEY,
                json_type(&other)
            ))
            .with_field(ENTRIES_KEY))
        }
    };

    let mut deck = StructuredDeck {
        name: document.name,
        ..Default::default()
    };

    for (section_name, section_value) in entries {
        if !include.includes(&section_name) {
            debug!("Skipping section '{}'", section_name);
            deck.skipped_sections.push(section_name);
            continue;
        }

        let items = match section_value {
            Value::Array(items) => items,
            other => {
                return Err(ParseError::malformed_document(format!(
                    "section must be a list of entries, found {}",
                    json_type(&other)
                ))
                .with_section(section_name))
            }
        };

        let mut section = DeckSection::new(section_name.clone());
        for (idx, item) in items.iter().enumerate() {
            let origin = RecordOrigin {
                section: Some(section_name.clone()),
                index: idx + 1,
                line: None,
            };
            match read_entry(item, origin)? {
                Some(record) => section.records.push(record),
                None => {
                    debug!(
                        "Skipping blank entry {} in section '{}'",
                        idx + 1,
                        section_name
                    );
                    deck.placeholders += 1;
                }
            }
        }
        deck.sections.push(section);
    }

    Ok(deck)
}

fn read_entry(item: &Value, origin: RecordOrigin) -> ParseResult<Option<RawRecord>> {
    let locate = |err: ParseError| crate::normalizer::locate(err, &origin);
    let missing = |key: &str| {
        locate(ParseError::schema(format!("missing required key '{}'", key)).with_field(key))
    };

    let entry = DeckEntry::deserialize(item)
        .map_err(|e| locate(ParseError::malformed_record(format!("invalid entry: {}", e))))?;

    let digest = match entry.card_digest {
        None => return Err(missing("card_digest")),
        Some(None) => return Ok(None),
        Some(Some(digest)) => digest,
    };

    let count = entry.count.ok_or_else(|| missing("count"))?;
    let printing_specified = entry
        .printing_specified
        .ok_or_else(|| missing("printing_specified"))?;
    let name = digest.name.ok_or_else(|| missing("card_digest.name"))?;
    let set_code = digest.set.ok_or_else(|| missing("card_digest.set"))?;
    let collector_number = digest
        .collector_number
        .ok_or_else(|| missing("card_digest.collector_number"))?;

    Ok(Some(RawRecord {
        count,
        name,
        printing: Some(Printing::new(set_code, collector_number)),
        printing_specified,
        art_label: None,
        land_check: LandCheck::RawName,
        origin,
    }))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Ingests structured deck exports, filtered by section
#[derive(Debug, Clone, Default)]
pub struct StructuredIngestor {
    include: IncludeSet,
}

impl StructuredIngestor {
    pub fn new(include: IncludeSet) -> Self {
        Self { include }
    }
}

impl DeckIngestor for StructuredIngestor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Structured
    }

    fn read_records(&self, content: &str) -> ParseResult<IngestReport> {
        let deck = parse_document(content, &self.include)?;
        if let Some(name) = &deck.name {
            debug!("Reading deck '{}'", name);
        }

        let mut report = IngestReport {
            deck_name: deck.name,
            sections_skipped: deck.skipped_sections,
            placeholders_skipped: deck.placeholders,
            ..Default::default()
        };
        for section in deck.sections {
            report.sections_included.push(section.name);
            report.records.extend(section.records);
        }
        Ok(report)
    }
}
