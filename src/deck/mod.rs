//! Deck data model shared by both ingestion pipelines

use std::collections::BTreeSet;
use std::fmt;

/// The five basic lands, which the mass entry tool refuses
pub const BASIC_LANDS: [&str; 5] = ["Plains", "Island", "Swamp", "Mountain", "Forest"];

/// Sections included when the caller does not choose any
pub const DEFAULT_SECTIONS: [&str; 3] = ["commanders", "nonlands", "lands"];

/// Sentinel section name selecting every section
pub const ALL_SECTIONS: &str = "all";

/// Exact-match check against [`BASIC_LANDS`]
pub fn is_basic_land(name: &str) -> bool {
    BASIC_LANDS.contains(&name)
}

/// A set code and collector number pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printing {
    pub set_code: String,
    pub collector_number: String,
}

impl Printing {
    pub fn new(set_code: impl Into<String>, collector_number: impl Into<String>) -> Self {
        Self {
            set_code: set_code.into(),
            collector_number: collector_number.into(),
        }
    }
}

/// Which spelling of the name decides basic-land classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandCheck {
    /// Classify on the name as exported
    RawName,
    /// Classify on the name after normalization rules ran
    NormalizedName,
}

/// Where a record came from, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOrigin {
    pub section: Option<String>,
    /// 1-based
    pub index: usize,
    pub line: Option<usize>,
}

/// Minimal record shape both ingestors produce for the normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub count: u32,
    pub name: String,
    pub printing: Option<Printing>,
    /// Whether the mass entry line should carry the printing
    pub printing_specified: bool,
    /// Art or subtype label, only carried by tabular exports
    pub art_label: Option<String>,
    pub land_check: LandCheck,
    pub origin: RecordOrigin,
}

/// A fully normalized card ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    pub count: u32,
    pub name: String,
    pub printing: Option<Printing>,
    pub is_basic_land: bool,
    pub art_label: Option<String>,
}

/// A named zone of a deck export
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSection {
    pub name: String,
    pub records: Vec<RawRecord>,
}

impl DeckSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }
}

/// Caller selection of deck sections to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeSet {
    All,
    Sections(BTreeSet<String>),
}

impl Default for IncludeSet {
    fn default() -> Self {
        Self::from_names(DEFAULT_SECTIONS)
    }
}

impl IncludeSet {
    /// Build a selection; any `all` entry selects everything
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sections = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if name == ALL_SECTIONS {
                return Self::All;
            }
            if !name.is_empty() {
                sections.insert(name);
            }
        }
        Self::Sections(sections)
    }

    pub fn includes(&self, section: &str) -> bool {
        match self {
            IncludeSet::All => true,
            IncludeSet::Sections(names) => names.contains(&section.to_lowercase()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, IncludeSet::Sections(names) if names.is_empty())
    }
}

impl fmt::Display for IncludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeSet::All => write!(f, "{}", ALL_SECTIONS),
            IncludeSet::Sections(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}
