//! Plant collection files.
//!
//! A collection is a TOML file of `[[plants]]` tables:
//!
//! ```toml
//! [[plants]]
//! id = "p1"
//! nickname = "Spike"
//! species = "Snake Plant"
//! last_watered = 2026-01-02T08:00:00Z
//! entered_care_at = "2025-11-20T00:00:00Z"
//! ```
//!
//! Timestamps may be TOML datetimes, RFC 3339 strings, or bare dates
//! (midnight UTC).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use verdant_core::PlantSnapshot;

#[derive(Debug, Deserialize)]
struct CollectionFile {
    #[serde(default)]
    plants: Vec<RawPlant>,
}

#[derive(Debug, Deserialize)]
struct RawPlant {
    id: String,
    nickname: Option<String>,
    species: Option<String>,
    last_watered: Option<toml::Value>,
    entered_care_at: Option<toml::Value>,
    last_fertilized: Option<toml::Value>,
}

/// Read and parse a collection file.
pub fn load_collection(path: &Path) -> Result<Vec<PlantSnapshot>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plants file: {}", path.display()))?;
    parse_collection(&content)
        .with_context(|| format!("failed to parse plants file: {}", path.display()))
}

/// Parse collection TOML into snapshots, in file order.
pub fn parse_collection(content: &str) -> Result<Vec<PlantSnapshot>> {
    let file: CollectionFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut plants = Vec::with_capacity(file.plants.len());
    for raw in file.plants {
        let id = raw.id.trim().to_owned();
        if id.is_empty() {
            bail!("plant id must not be empty");
        }
        if !seen.insert(id.clone()) {
            bail!("duplicate plant id: {id}");
        }

        plants.push(PlantSnapshot {
            last_watered: timestamp(&id, "last_watered", raw.last_watered)?,
            entered_care_at: timestamp(&id, "entered_care_at", raw.entered_care_at)?,
            last_fertilized: timestamp(&id, "last_fertilized", raw.last_fertilized)?,
            nickname: raw.nickname,
            species: raw.species,
            id,
        });
    }
    Ok(plants)
}

fn timestamp(
    plant_id: &str,
    field: &str,
    value: Option<toml::Value>,
) -> Result<Option<DateTime<Utc>>> {
    let text = match value {
        None => return Ok(None),
        Some(toml::Value::String(s)) => s,
        Some(toml::Value::Datetime(dt)) => dt.to_string(),
        Some(other) => bail!(
            "plant {plant_id}: {field} must be a timestamp, got {}",
            other.type_str()
        ),
    };
    let text = text.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("plant {plant_id}: invalid {field} timestamp: {text}"))?;
    Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()))
}
