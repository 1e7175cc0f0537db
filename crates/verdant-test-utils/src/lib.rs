//! Shared test utilities for verdant integration tests.
//!
//! Provides small, hand-checked knowledge documents, a fixed clock, and
//! helpers that write the documents to a temporary data directory.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use verdant_core::config::KnowledgeConfig;
use verdant_core::schedule::Clock;
use verdant_core::PlantKnowledgeBase;

// ---------------------------------------------------------------------------
// Fixture documents
// ---------------------------------------------------------------------------

/// Two curated species. `snake_plant` waters every 14 days with winter 1.3
/// and new-plant 1.2, so a new snake plant in winter waters every 21 days.
pub const CURATED_JSON: &str = r#"{
  "plants": {
    "snake_plant": {
      "common_names": ["Snake Plant", "Mother-in-law's Tongue"],
      "category": "Dracaena",
      "watering": {
        "frequency_days": 14,
        "seasonal_adjustments": {
          "spring": {"multiplier": 1.0},
          "summer": {"multiplier": 0.8},
          "fall": {"multiplier": 1.1},
          "winter": {"multiplier": 1.3}
        },
        "growth_stage_adjustments": {
          "new_plant": {"multiplier": 1.2, "note": "settling in"},
          "established": {"multiplier": 1.0},
          "mature": {"multiplier": 0.9}
        }
      },
      "fertilizing": {"frequency_days": 60},
      "repotting": {"frequency_years": 3},
      "care_tips": ["Let it dry out", "Low light is fine", "Do not overwater", "Dust the leaves"],
      "personality": "sarcastic_survivor"
    },
    "boston_fern": {
      "common_names": ["Boston Fern"],
      "watering": {"frequency_days": 3},
      "fertilizing": {"frequency_days": 30},
      "personality": "dramatic_communicator"
    }
  },
  "seasonal_care_calendar": {
    "winter": {"general_notes": "Water less", "tasks": ["Stop fertilizing"]},
    "summer": {"general_notes": "Water more", "tasks": ["Check soil often", "Watch for pests"]}
  }
}"#;

/// Templates for two archetypes. `dramatic_communicator` has no fertilizing
/// template, so its fertilizing reminders use the neutral text.
pub const PERSONALITIES_JSON: &str = r#"{
  "personalities": {
    "sarcastic_survivor": {
      "message_templates": {
        "watering_reminder": ["{plant_name} survived {days} days. Water, maybe?", "unused"],
        "fertilizing_reminder": ["{plant_name} could eat. {days} days late."]
      }
    },
    "dramatic_communicator": {
      "message_templates": {
        "watering_reminder": ["{plant_name} is WILTING after {days} days!"]
      }
    }
  }
}"#;

/// Three catalog records covering drought, moisture and vessel phrasing.
pub const CATALOG_JSON: &str = r#"[
  {"common": ["Variegated Carabbean Agave"], "latin": "Agave angustifolia 'Marginata'",
   "category": "Cactus And Succulent", "climate": "Arid Tropical",
   "ideallight": "Full sun", "toleratedlight": "Strong light",
   "watering": "Must be dry between watering. Water only when the soil is dry.",
   "tempmin": {"celsius": 10}, "tempmax": {"celsius": 30}},
  {"common": ["Maindenhair", "Delta maidenhair"], "latin": "Adiantum raddianum",
   "category": "Fern", "climate": "Tropical humid",
   "ideallight": "Bright light", "toleratedlight": "Diffused",
   "watering": "Keep moist between watering. Must not be dry.",
   "tempmin": {"celsius": 12}, "tempmax": {"celsius": 27}},
  {"common": ["Scarlet star"], "latin": "Guzmania lingulata",
   "category": "Bromeliad", "climate": "Tropical humid",
   "ideallight": "Bright light", "toleratedlight": "Diffused",
   "watering": "Change water in vase every week.",
   "tempmin": {"celsius": 16}, "tempmax": {"celsius": 30}}
]"#;

/// Knowledge base built from the three fixture documents.
pub fn fixture_knowledge() -> Arc<PlantKnowledgeBase> {
    Arc::new(
        PlantKnowledgeBase::builder()
            .curated_json(CURATED_JSON)
            .personalities_json(PERSONALITIES_JSON)
            .catalog_json(CATALOG_JSON)
            .build(),
    )
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Shorthand for a UTC instant on the hour.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("invalid test date")
}

/// A clock that reads whatever it was last set to.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex poisoned") = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

/// `now` minus `days` whole days.
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

// ---------------------------------------------------------------------------
// On-disk sources
// ---------------------------------------------------------------------------

/// Write the three documents into a fresh temporary directory. A `None`
/// document is left out so the loader sees a missing file.
pub fn write_data_dir(
    curated: Option<&str>,
    personalities: Option<&str>,
    catalog: Option<&str>,
) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let files = [
        (KnowledgeConfig::CURATED_FILE, curated),
        (KnowledgeConfig::PERSONALITIES_FILE, personalities),
        (KnowledgeConfig::CATALOG_FILE, catalog),
    ];
    for (name, content) in files {
        if let Some(content) = content {
            write_file(dir.path(), name, content);
        }
    }
    dir
}

/// Write the fixture documents into a temporary directory.
pub fn write_fixture_data_dir() -> TempDir {
    write_data_dir(Some(CURATED_JSON), Some(PERSONALITIES_JSON), Some(CATALOG_JSON))
}

/// Write `content` to `dir/name`, panicking on failure.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
}
