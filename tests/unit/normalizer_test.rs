use std::borrow::Cow;

use pretty_assertions::assert_eq;

use mtgutil::deck::{LandCheck, RecordOrigin};
use mtgutil::normalizer::{AlternateFaceRule, NameRule, TokenSuffixRule};
use mtgutil::parser::repair_split_name;
use mtgutil::{Normalizer, ParseErrorKind, Printing, RawRecord, SetCodeResolver, SetCodeTable};

fn record(name: &str, set: &str, number: &str, specified: bool, land_check: LandCheck) -> RawRecord {
    RawRecord {
        count: 1,
        name: name.to_string(),
        printing: Some(Printing::new(set, number)),
        printing_specified: specified,
        art_label: None,
        land_check,
        origin: RecordOrigin::default(),
    }
}

#[test]
fn test_alternate_face_removal_is_idempotent() {
    let normalizer = Normalizer::default();
    for name in [
        "Virtue of Strength // Garenbrig Growth",
        "Fire // Ice",
        "Delver of Secrets // Insectile Aberration",
        "Sol Ring",
    ] {
        let once = normalizer.normalize_name(name);
        assert_eq!(normalizer.normalize_name(&once), once);
        assert!(!once.contains(" // "));
    }
}

#[test]
fn test_token_suffix_only_at_end() {
    let rule = TokenSuffixRule;
    assert_eq!(rule.apply("Food Token"), "Food");
    assert_eq!(rule.apply("Token Collector"), "Token Collector");
    assert_eq!(rule.apply("Tokens of Faith"), "Tokens of Faith");
    assert_eq!(rule.apply("Tokenize"), "Tokenize");
}

#[test]
fn test_rules_leave_plain_names_borrowed() {
    assert!(matches!(AlternateFaceRule.apply("Sol Ring"), Cow::Borrowed(_)));
    assert!(matches!(TokenSuffixRule.apply("Sol Ring"), Cow::Borrowed(_)));
}

#[test]
fn test_collector_number_artifacts() {
    let normalizer = Normalizer::default();
    assert_eq!(normalizer.normalize_collector_number("12★"), "12");
    assert_eq!(normalizer.normalize_collector_number("12â˜…"), "12");
    assert_eq!(normalizer.normalize_collector_number("CON-15"), "CON-15");
}

#[test]
fn test_set_codes_uppercased_after_mapping() {
    let table = SetCodeTable::new().with_entry("PLST", "list");
    assert_eq!(table.resolve("plst"), Some("list"));

    let normalizer = Normalizer::new(table);
    assert_eq!(normalizer.normalize_set_code("plst"), "LIST");
    assert_eq!(normalizer.normalize_set_code("c21"), "C21");
}

#[test]
fn test_custom_resolver() {
    #[derive(Debug)]
    struct Everything;

    impl SetCodeResolver for Everything {
        fn resolve(&self, _set_code: &str) -> Option<&str> {
            Some("sld")
        }
    }

    let normalizer = Normalizer::new(Everything);
    assert_eq!(normalizer.normalize_set_code("anything"), "SLD");
}

#[test]
fn test_printing_dropped_when_unspecified() {
    let normalizer = Normalizer::default();
    let entry = normalizer
        .normalize(record("Sol Ring", "c21", "263", false, LandCheck::RawName))
        .unwrap();
    assert_eq!(entry.printing, None);

    let entry = normalizer
        .normalize(record("Sol Ring", "c21", "263", true, LandCheck::RawName))
        .unwrap();
    assert_eq!(entry.printing, Some(Printing::new("C21", "263")));
}

#[test]
fn test_land_keeps_printing_when_unspecified() {
    let normalizer = Normalizer::default();
    let entry = normalizer
        .normalize(record("Swamp", "dmu", "271", false, LandCheck::RawName))
        .unwrap();
    assert!(entry.is_basic_land);
    assert_eq!(entry.printing, Some(Printing::new("DMU", "271")));
}

#[test]
fn test_land_check_uses_requested_name() {
    let normalizer = Normalizer::default();

    // Only the normalized name is a basic land
    let raw = record("Forest // Forest", "sld", "1", true, LandCheck::RawName);
    assert!(!normalizer.normalize(raw).unwrap().is_basic_land);

    let normalized = record("Forest // Forest", "sld", "1", true, LandCheck::NormalizedName);
    assert!(normalizer.normalize(normalized).unwrap().is_basic_land);
}

#[test]
fn test_snow_lands_are_not_basic() {
    let normalizer = Normalizer::default();
    let entry = normalizer
        .normalize(record("Snow-Covered Forest", "khm", "285", true, LandCheck::RawName))
        .unwrap();
    assert!(!entry.is_basic_land);
}

#[test]
fn test_empty_name_is_malformed() {
    let normalizer = Normalizer::default();
    let err = normalizer
        .normalize(record(" // Back Face", "xyz", "1", true, LandCheck::RawName))
        .unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MalformedRecord);
    assert_eq!(err.field.as_deref(), Some("name"));
}

#[test]
fn test_split_name_repair_offsets() {
    let fields = ["1", "\"Kurbis", " Harvest Celebrant\"", "blc", "4"];
    let repaired = repair_split_name(&fields, 1, 4, ",").unwrap();
    assert_eq!(repaired.name, "Kurbis, Harvest Celebrant");
    assert_eq!(repaired.offset, 1);
    assert_eq!(fields[3 + repaired.offset], "4");

    let fields = ["1", "\"A", " B", " C\"", "set", "7"];
    let repaired = repair_split_name(&fields, 1, 4, ",").unwrap();
    assert_eq!(repaired.name, "A, B, C");
    assert_eq!(repaired.offset, 2);

    let fields = ["1", "Sol Ring", "c21", "263"];
    assert_eq!(repair_split_name(&fields, 1, 4, ",").unwrap().offset, 0);
}
