//! Statistics for a single conversion run

use std::time::Duration;

use crate::deck::CardEntry;
use crate::parser::{IngestReport, SourceFormat};

/// What a conversion read and produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub format: SourceFormat,
    pub deck_name: Option<String>,
    /// Records handed to the normalizer
    pub records_read: usize,
    /// Sum of card counts over all records
    pub cards_total: u64,
    pub main_entries: usize,
    pub land_entries: usize,
    pub sections_included: Vec<String>,
    pub sections_skipped: Vec<String>,
    pub placeholders_skipped: usize,
    pub names_repaired: usize,
    pub input_size_bytes: u64,
    pub output_size_bytes: u64,
    pub processing_time_ms: u64,
}

impl ConversionStats {
    /// Collect statistics from an ingest pass and its normalized entries
    pub fn collect(
        format: SourceFormat,
        report: &IngestReport,
        entries: &[CardEntry],
        input_size: usize,
        output_size: usize,
        elapsed: Duration,
    ) -> Self {
        let land_entries = entries.iter().filter(|e| e.is_basic_land).count();
        Self {
            format,
            deck_name: report.deck_name.clone(),
            records_read: report.records.len(),
            cards_total: entries.iter().map(|e| u64::from(e.count)).sum(),
            main_entries: entries.len() - land_entries,
            land_entries,
            sections_included: report.sections_included.clone(),
            sections_skipped: report.sections_skipped.clone(),
            placeholders_skipped: report.placeholders_skipped,
            names_repaired: report.names_repaired,
            input_size_bytes: input_size as u64,
            output_size_bytes: output_size as u64,
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} export: {} records ({} cards) -> {} mass entry lines, {} basic lands",
            self.format, self.records_read, self.cards_total, self.main_entries, self.land_entries
        )
    }

    /// Human-readable report for `--stats`
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec!["Conversion Statistics:".to_string()];
        if let Some(name) = &self.deck_name {
            lines.push(format!("Deck: {}", name));
        }
        lines.push(format!("Source format: {}", self.format));
        lines.push(format!("Records read: {}", self.records_read));
        lines.push(format!("Total cards: {}", self.cards_total));
        lines.push(format!("Mass entry lines: {}", self.main_entries));
        lines.push(format!("Basic land lines: {}", self.land_entries));
        if self.format == SourceFormat::Structured {
            lines.push(format!(
                "Sections included: {}",
                display_list(&self.sections_included)
            ));
            lines.push(format!(
                "Sections skipped: {}",
                display_list(&self.sections_skipped)
            ));
            lines.push(format!("Blank entries skipped: {}", self.placeholders_skipped));
        } else {
            lines.push(format!("Split names repaired: {}", self.names_repaired));
        }
        lines.push(format!("Input size: {} bytes", self.input_size_bytes));
        lines.push(format!("Output size: {} bytes", self.output_size_bytes));
        lines.push(format!("Processing time: {}ms", self.processing_time_ms));
        lines
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
