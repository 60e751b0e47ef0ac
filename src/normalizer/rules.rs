//! Individual name and field clean-up rules

use std::borrow::Cow;
use std::fmt;

/// Separator between the faces of a double-faced card
pub const FACE_SEPARATOR: &str = " // ";

/// Suffix Scryfall appends to token card names
pub const TOKEN_SUFFIX: &str = " Token";

/// Star glyph found in promo collector numbers, plus its mis-decoded form
pub const COLLECTOR_NUMBER_ARTIFACTS: [&str; 2] = ["â˜…", "★"];

/// A single, independent rewrite of a card name.
///
/// Rules must be idempotent: applying one to its own output is a no-op.
pub trait NameRule: fmt::Debug + Send + Sync {
    /// Short identifier used in log output
    fn name(&self) -> &'static str;

    fn apply<'a>(&self, name: &'a str) -> Cow<'a, str>;
}

/// Keep only the front face: `"Virtue of Strength // Garenbrig Growth"` -> `"Virtue of Strength"`
#[derive(Debug, Clone, Copy, Default)]
pub struct AlternateFaceRule;

impl NameRule for AlternateFaceRule {
    fn name(&self) -> &'static str {
        "alternate-face"
    }

    fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match name.find(FACE_SEPARATOR) {
            Some(idx) => Cow::Borrowed(&name[..idx]),
            None => Cow::Borrowed(name),
        }
    }
}

/// Drop the token marker: `"Food Token"` -> `"Food"`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSuffixRule;

impl NameRule for TokenSuffixRule {
    fn name(&self) -> &'static str {
        "token-suffix"
    }

    fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match name.strip_suffix(TOKEN_SUFFIX) {
            Some(stripped) => Cow::Borrowed(stripped),
            None => Cow::Borrowed(name),
        }
    }
}

/// Rules applied to every card name, in order
pub fn default_name_rules() -> Vec<Box<dyn NameRule>> {
    vec![Box::new(AlternateFaceRule), Box::new(TokenSuffixRule)]
}

/// Remove known glyph artifacts from a collector number
pub fn strip_collector_number_artifacts(collector_number: &str) -> Cow<'_, str> {
    if !COLLECTOR_NUMBER_ARTIFACTS
        .iter()
        .any(|artifact| collector_number.contains(artifact))
    {
        return Cow::Borrowed(collector_number);
    }

    let mut cleaned = collector_number.to_string();
    for artifact in COLLECTOR_NUMBER_ARTIFACTS {
        cleaned = cleaned.replace(artifact, "");
    }
    Cow::Owned(cleaned)
}
