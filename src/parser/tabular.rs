//! Delimited (CSV-style) deck export ingestion.
//!
//! Rows are split naively on the delimiter. Exporters wrap names containing the
//! delimiter in quotes, so such a name arrives fragmented across several fields
//! and every later column shifts right. [`repair_split_name`] stitches the name
//! back together and reports how far the row shifted.

use log::debug;

use crate::conversion::DelimiterType;
use crate::deck::{LandCheck, Printing, RawRecord, RecordOrigin};
use crate::error::{ParseError, ParseResult};
use crate::parser::{DeckIngestor, IngestReport, SourceFormat};

pub const COUNT_COLUMN: &str = "count";
pub const NAME_COLUMN: &str = "name";
pub const SET_CODE_COLUMN: &str = "set_code";
pub const COLLECTOR_NUMBER_COLUMN: &str = "collector_number";

const QUOTE: char = '"';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Column positions resolved from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularHeader {
    pub count: usize,
    pub name: usize,
    pub set_code: usize,
    pub collector_number: usize,
    /// Number of columns the header declares
    pub width: usize,
}

impl TabularHeader {
    /// Resolve the required columns; extra columns are ignored
    pub fn parse(line: &str, delimiter: DelimiterType) -> ParseResult<Self> {
        let columns: Vec<&str> = line
            .trim_start_matches(BYTE_ORDER_MARK)
            .split(delimiter.as_str())
            .map(|column| column.trim())
            .collect();

        let position = |wanted: &str| -> ParseResult<usize> {
            columns
                .iter()
                .position(|column| *column == wanted)
                .ok_or_else(|| {
                    ParseError::schema(format!("missing required column '{}'", wanted))
                        .with_line(1)
                        .with_field(wanted)
                })
        };

        Ok(Self {
            count: position(COUNT_COLUMN)?,
            name: position(NAME_COLUMN)?,
            set_code: position(SET_CODE_COLUMN)?,
            collector_number: position(COLLECTOR_NUMBER_COLUMN)?,
            width: columns.len(),
        })
    }
}

/// A card name rejoined from delimiter fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairedName {
    pub name: String,
    /// Extra fields the name consumed; later columns shift by this much
    pub offset: usize,
}

/// Rejoin a quoted name that naive splitting fragmented.
///
/// Repair only kicks in when the name field opens with a quote and the row has
/// more fields than the header declares. Fragments are consumed until one ends
/// with a quote, then rejoined with `delimiter`. A quoted name that was not
/// split is simply unquoted. Doubled quotes inside the name are unescaped.
pub fn repair_split_name(
    fields: &[&str],
    name_index: usize,
    expected_columns: usize,
    delimiter: &str,
) -> ParseResult<RepairedName> {
    let first = fields
        .get(name_index)
        .copied()
        .ok_or_else(|| {
            ParseError::malformed_record("record has no name field").with_field(NAME_COLUMN)
        })?
        .trim();

    if !first.starts_with(QUOTE) {
        return Ok(RepairedName {
            name: first.to_string(),
            offset: 0,
        });
    }

    let closes = |fragment: &str, is_first: bool| {
        let fragment = fragment.trim_end();
        let min_len = if is_first { 2 } else { 1 };
        fragment.len() >= min_len && fragment.ends_with(QUOTE)
    };
    let unterminated =
        || ParseError::malformed_record("unterminated quoted name").with_field(NAME_COLUMN);

    if fields.len() <= expected_columns {
        // Nothing was split; only strip the wrapping quotes
        if !closes(first, true) {
            return Err(unterminated());
        }
        return Ok(RepairedName {
            name: unquote(first),
            offset: 0,
        });
    }

    let mut pieces = vec![first];
    let mut offset = 0;
    let mut current = first;
    let mut is_first = true;
    while !closes(current, is_first) {
        offset += 1;
        is_first = false;
        current = fields
            .get(name_index + offset)
            .copied()
            .ok_or_else(unterminated)?;
        pieces.push(current);
    }

    Ok(RepairedName {
        name: unquote(pieces.join(delimiter).trim_end()),
        offset,
    })
}

fn field_at<'r>(fields: &[&'r str], index: usize, column: &str) -> ParseResult<&'r str> {
    fields.get(index).copied().ok_or_else(|| {
        ParseError::malformed_record(format!(
            "record has {} fields, missing '{}'",
            fields.len(),
            column
        ))
        .with_field(column)
    })
}

fn unquote(value: &str) -> String {
    let inner = value.strip_prefix(QUOTE).unwrap_or(value);
    let inner = inner.strip_suffix(QUOTE).unwrap_or(inner);
    inner.replace("\"\"", "\"")
}

/// Ingests delimited deck exports
#[derive(Debug, Clone)]
pub struct TabularIngestor {
    delimiter: DelimiterType,
}

impl Default for TabularIngestor {
    fn default() -> Self {
        Self::new(DelimiterType::Comma)
    }
}

impl TabularIngestor {
    pub fn new(delimiter: DelimiterType) -> Self {
        Self { delimiter }
    }

    fn read_row(
        &self,
        header: &TabularHeader,
        row: &str,
        origin: RecordOrigin,
    ) -> ParseResult<(RawRecord, usize)> {
        let delimiter = self.delimiter.as_str();
        let fields: Vec<&str> = row.split(delimiter).collect();
        let locate = |err: ParseError| crate::normalizer::locate(err, &origin);

        let repaired =
            repair_split_name(&fields, header.name, header.width, delimiter).map_err(&locate)?;
        if repaired.offset > 0 {
            debug!(
                "Rejoined '{}' from {} fields on line {}",
                repaired.name,
                repaired.offset + 1,
                origin.line.unwrap_or_default()
            );
        }

        // Columns after the name shift by the number of extra fragments
        let shifted = |index: usize| {
            if index > header.name {
                index + repaired.offset
            } else {
                index
            }
        };
        let raw_count = field_at(&fields, shifted(header.count), COUNT_COLUMN)
            .map_err(&locate)?
            .trim();
        let count = raw_count.parse::<u32>().ok().filter(|count| *count > 0).ok_or_else(|| {
            locate(
                ParseError::malformed_record(format!("invalid card count '{}'", raw_count))
                    .with_field(COUNT_COLUMN),
            )
        })?;

        let set_code_index = shifted(header.set_code);
        let set_code = field_at(&fields, set_code_index, SET_CODE_COLUMN).map_err(&locate)?;
        let collector_number =
            field_at(&fields, shifted(header.collector_number), COLLECTOR_NUMBER_COLUMN)
                .map_err(&locate)?;

        // The column just before the set code carries the land art/subtype label
        let art_label = match set_code_index.checked_sub(1) {
            Some(index) => fields.get(index).map(|label| label.to_string()),
            None => None,
        };

        let record = RawRecord {
            count,
            name: repaired.name,
            printing: Some(Printing::new(set_code, collector_number)),
            printing_specified: true,
            art_label,
            land_check: LandCheck::NormalizedName,
            origin,
        };
        Ok((record, repaired.offset))
    }
}

impl DeckIngestor for TabularIngestor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Tabular
    }

    fn read_records(&self, content: &str) -> ParseResult<IngestReport> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header_text) = lines
            .next()
            .ok_or_else(|| ParseError::schema("deck export is empty; a header row is required"))?;
        let header = TabularHeader::parse(header_text, self.delimiter)
            .map_err(|err| err.with_line(header_line))?;
        debug!("Tabular header ({}-delimited): {:?}", self.delimiter, header);

        let mut report = IngestReport::default();
        for (index, (line_number, row)) in lines.enumerate() {
            let origin = RecordOrigin {
                section: None,
                index: index + 1,
                line: Some(line_number),
            };
            let (record, offset) = self.read_row(&header, row, origin)?;
            if offset > 0 {
                report.names_repaired += 1;
            }
            report.records.push(record);
        }

        Ok(report)
    }
}
