//! Mass entry text rendering

use crate::deck::CardEntry;

/// Separates the mass entry block from the basic land appendix
pub const LAND_BANNER: &str = concat!(
    "\n\n",
    "-----------------------------------------------------------\n",
    "| NOTE:                                                    |\n",
    "| Basic lands are not supported by TCGPlayer's mass entry. |\n",
    "| Copy these somewhere so you can find them manually.      |\n",
    "| They should already be in \"search-ready\" format.         |\n",
    "-----------------------------------------------------------\n",
    "\n",
);

/// Mass entry line: `4 Lightning Bolt [M10] 146`
pub fn format_main_entry(entry: &CardEntry) -> String {
    match &entry.printing {
        Some(printing) => format!(
            "{} {} [{}] {}",
            entry.count, entry.name, printing.set_code, printing.collector_number
        ),
        None => format!("{} {}", entry.count, entry.name),
    }
}

/// Search-friendly land line: `Forest (278) - Basic Land (BLB)`
pub fn format_land_entry(entry: &CardEntry) -> String {
    let Some(printing) = &entry.printing else {
        return entry.name.clone();
    };

    match entry.art_label.as_deref().filter(|label| !label.is_empty()) {
        Some(label) => format!(
            "{} ({}) - {} ({})",
            entry.name, printing.collector_number, label, printing.set_code
        ),
        None => format!(
            "{} ({}) - ({})",
            entry.name, printing.collector_number, printing.set_code
        ),
    }
}

/// Rendered lines, split into the mass entry block and the land appendix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    pub main_entries: Vec<String>,
    pub land_entries: Vec<String>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a CardEntry>) -> Self {
        let mut document = Self::new();
        for entry in entries {
            document.push(entry);
        }
        document
    }

    /// Route an entry to the block it belongs in
    pub fn push(&mut self, entry: &CardEntry) {
        if entry.is_basic_land {
            self.land_entries.push(format_land_entry(entry));
        } else {
            self.main_entries.push(format_main_entry(entry));
        }
    }

    /// Final text. The banner and appendix only appear when there are lands.
    pub fn render(&self) -> String {
        let mut output = self.main_entries.join("\n");
        if !self.land_entries.is_empty() {
            output.push_str(LAND_BANNER);
            output.push_str(&self.land_entries.join("\n"));
        }
        output
    }
}

/// Render normalized entries to mass entry text
pub fn format_mass_entry(entries: &[CardEntry]) -> String {
    OutputDocument::from_entries(entries).render()
}
