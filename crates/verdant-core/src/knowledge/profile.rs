//! Immutable per-species care profiles.

use serde::{Deserialize, Serialize};

use crate::care::{GrowthStage, Season};
use crate::personality::PersonalityArchetype;

/// Watering interval multipliers per season. A multiplier above 1.0 means a
/// longer interval (less water).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalMultipliers {
    pub spring: f64,
    pub summer: f64,
    pub fall: f64,
    pub winter: f64,
}

impl SeasonalMultipliers {
    /// Every season at 1.0.
    pub const NEUTRAL: Self = Self {
        spring: 1.0,
        summer: 1.0,
        fall: 1.0,
        winter: 1.0,
    };

    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }

    /// Replace the multiplier for one season.
    pub fn with(mut self, season: Season, multiplier: f64) -> Self {
        match season {
            Season::Spring => self.spring = multiplier,
            Season::Summer => self.summer = multiplier,
            Season::Fall => self.fall = multiplier,
            Season::Winter => self.winter = multiplier,
        }
        self
    }
}

impl Default for SeasonalMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Watering interval multipliers per growth stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthMultipliers {
    pub new_plant: f64,
    pub established: f64,
    pub mature: f64,
}

impl GrowthMultipliers {
    /// Every stage at 1.0.
    pub const NEUTRAL: Self = Self {
        new_plant: 1.0,
        established: 1.0,
        mature: 1.0,
    };

    /// Stage multipliers applied to open-catalog species.
    pub const CATALOG: Self = Self {
        new_plant: 1.2,
        established: 1.0,
        mature: 0.9,
    };

    pub fn for_stage(&self, stage: GrowthStage) -> f64 {
        match stage {
            GrowthStage::NewPlant => self.new_plant,
            GrowthStage::Established => self.established,
            GrowthStage::Mature => self.mature,
        }
    }
}

impl Default for GrowthMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Where a profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Hand-written entry in the curated care-profile table.
    Curated,
    /// Derived from an open-catalog record through the watering heuristics.
    CatalogDerived,
    /// The fallback profile used for unresolved species.
    SystemDefault,
}

/// Everything the scheduler needs to know about one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantCareProfile {
    /// Canonical identifier (lower-case, underscores).
    pub species_id: String,
    /// Common names this species is known by.
    pub common_names: Vec<String>,
    pub latin_name: Option<String>,
    pub category: Option<String>,
    pub watering_frequency_days: u32,
    pub seasonal_multipliers: SeasonalMultipliers,
    pub growth_multipliers: GrowthMultipliers,
    pub fertilizing_frequency_days: u32,
    pub repotting_frequency_years: u32,
    pub personality: PersonalityArchetype,
    pub care_tips: Vec<String>,
    pub provenance: Provenance,
}

impl PlantCareProfile {
    pub const DEFAULT_WATERING_DAYS: u32 = 7;
    pub const DEFAULT_FERTILIZING_DAYS: u32 = 60;
    pub const DEFAULT_REPOTTING_YEARS: u32 = 2;

    /// The profile applied to any species no source can resolve.
    pub fn system_default() -> Self {
        Self {
            species_id: "unknown".to_owned(),
            common_names: Vec::new(),
            latin_name: None,
            category: None,
            watering_frequency_days: Self::DEFAULT_WATERING_DAYS,
            seasonal_multipliers: SeasonalMultipliers::NEUTRAL,
            growth_multipliers: GrowthMultipliers::NEUTRAL,
            fertilizing_frequency_days: Self::DEFAULT_FERTILIZING_DAYS,
            repotting_frequency_years: Self::DEFAULT_REPOTTING_YEARS,
            personality: PersonalityArchetype::default(),
            care_tips: Vec::new(),
            provenance: Provenance::SystemDefault,
        }
    }

    /// Watering interval in whole days for a season and growth stage.
    ///
    /// `floor(base * seasonal * growth)`, never less than one day.
    pub fn adjusted_watering_days(&self, season: Season, stage: GrowthStage) -> u32 {
        adjusted_frequency(
            self.watering_frequency_days,
            self.seasonal_multipliers.for_season(season),
            self.growth_multipliers.for_stage(stage),
        )
    }
}

/// Tolerance for binary representations of products like `14 * 1.5` that
/// land a hair below the intended integer.
const FLOOR_EPSILON: f64 = 1e-9;

/// `floor(base * seasonal * growth)` clamped to at least one day.
///
/// Non-finite or non-positive products also clamp to one day.
pub fn adjusted_frequency(base_days: u32, seasonal: f64, growth: f64) -> u32 {
    let product = f64::from(base_days) * seasonal * growth;
    if !product.is_finite() || product < 1.0 {
        return 1;
    }
    let floored = (product + FLOOR_EPSILON).floor();
    if floored >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (floored as u32).max(1)
    }
}
