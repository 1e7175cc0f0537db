//! Serde shapes of the three backing documents and their tolerant loaders.
//!
//! A document that cannot be read or parsed becomes an empty document; a
//! single malformed entry inside an otherwise valid document is skipped.
//! Both cases are logged at `warn` and never surface to callers.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

/// Errors raised while reading one backing source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {source_name} from {path}: {error}")]
    Io {
        source_name: &'static str,
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse {source_name}: {error}")]
    Json {
        source_name: &'static str,
        #[source]
        error: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Curated care-profile table
// ---------------------------------------------------------------------------

/// Root of `plant_care_schedules.json`.
#[derive(Debug, Default, Deserialize)]
pub struct CuratedDocument {
    /// Profiles keyed by species id. Ordered so alias scans are stable.
    #[serde(default)]
    pub plants: BTreeMap<String, serde_json::Value>,
    /// General seasonal notes keyed by season name.
    #[serde(default)]
    pub seasonal_care_calendar: BTreeMap<String, SeasonalCalendarEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalCalendarEntry {
    #[serde(default)]
    pub general_notes: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// One curated species entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CuratedEntry {
    #[serde(default)]
    pub common_names: Vec<String>,
    #[serde(default)]
    pub latin_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub watering: CuratedWatering,
    #[serde(default)]
    pub fertilizing: CuratedFertilizing,
    #[serde(default)]
    pub repotting: CuratedRepotting,
    #[serde(default)]
    pub care_tips: Vec<String>,
    #[serde(default)]
    pub personality: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CuratedWatering {
    pub frequency_days: Option<u32>,
    #[serde(default)]
    pub seasonal_adjustments: HashMap<String, SeasonalAdjustment>,
    #[serde(default)]
    pub growth_stage_adjustments: HashMap<String, StageAdjustment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalAdjustment {
    pub multiplier: Option<f64>,
    pub frequency_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageAdjustment {
    pub multiplier: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CuratedFertilizing {
    pub frequency_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CuratedRepotting {
    pub frequency_years: Option<u32>,
}

// ---------------------------------------------------------------------------
// Personality archetype table
// ---------------------------------------------------------------------------

/// Root of `plant_personalities.json`.
#[derive(Debug, Default, Deserialize)]
pub struct PersonalityDocument {
    #[serde(default)]
    pub personalities: BTreeMap<String, PersonalityEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonalityEntry {
    #[serde(default)]
    pub message_templates: BTreeMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Open species catalog
// ---------------------------------------------------------------------------

/// One record of the open catalog (`house_plants.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub common: Vec<String>,
    #[serde(default)]
    pub latin: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub watering: String,
    #[serde(default)]
    pub ideallight: String,
    #[serde(default)]
    pub toleratedlight: String,
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub tempmin: Temperature,
    #[serde(default)]
    pub tempmax: Temperature,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Temperature {
    pub celsius: Option<f64>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read a source file into a string.
pub fn read_source(source_name: &'static str, path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|error| SourceError::Io {
        source_name,
        path: path.to_owned(),
        error,
    })
}

/// Parse a whole JSON document.
pub fn parse_document<T: DeserializeOwned>(
    source_name: &'static str,
    content: &str,
) -> Result<T, SourceError> {
    serde_json::from_str(content).map_err(|error| SourceError::Json { source_name, error })
}

/// Parse a document, degrading to `T::default()` with a warning on failure.
pub fn parse_or_empty<T: DeserializeOwned + Default>(source_name: &'static str, content: &str) -> T {
    match parse_document(source_name, content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "{source_name} unavailable; continuing with an empty table");
            T::default()
        }
    }
}

/// Read a source file, degrading to empty text when it cannot be read.
pub fn read_or_empty(source_name: &'static str, path: &Path) -> String {
    read_source(source_name, path).unwrap_or_else(|e| {
        warn!(error = %e, "{source_name} unavailable; continuing with an empty table");
        String::new()
    })
}

/// Parse the open catalog record by record, skipping malformed records.
pub fn parse_catalog(content: &str) -> Vec<CatalogRecord> {
    let raw: Vec<serde_json::Value> = parse_or_empty("open species catalog", content);
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<CatalogRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = i, error = %e, "skipping malformed catalog record");
                None
            }
        })
        .collect()
}

/// Decode one curated entry, or `None` (with a warning) when it is malformed.
pub fn decode_curated_entry(species_id: &str, value: serde_json::Value) -> Option<CuratedEntry> {
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(species_id, error = %e, "skipping malformed curated profile");
            None
        }
    }
}
