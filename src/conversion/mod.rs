//! Deck export to mass entry conversion
//!
//! This module contains the conversion engine, configuration, input limits and statistics.

pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;

pub use config::{ConversionConfig, DelimiterType};

pub use engine::{convert_deck, convert_deck_from_source, ConversionEngine, MassEntryData};

pub use stats::ConversionStats;

pub use crate::error::ConversionResult;

