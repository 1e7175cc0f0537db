//! Profile derivation for open-catalog and curated entries.

use tracing::warn;

use super::normalize_key;
use super::profile::{GrowthMultipliers, PlantCareProfile, Provenance, SeasonalMultipliers};
use super::sources::{CatalogRecord, CuratedEntry};
use crate::care::{GrowthStage, Season};
use crate::personality::PersonalityArchetype;
use crate::watering::WateringHeuristics;

/// Care tips kept per catalog-derived profile.
pub const MAX_CATALOG_TIPS: usize = 3;

const FERTILIZING_DAYS: u32 = 45;
const SUCCULENT_FERTILIZING_DAYS: u32 = 90;

/// Upper bound on curated watering and fertilizing intervals.
pub const MAX_CURATED_FREQUENCY_DAYS: u32 = 3650;
/// Upper bound on curated repotting intervals.
pub const MAX_CURATED_REPOTTING_YEARS: u32 = 100;

/// Drought-tolerant categories, for care tips.
fn is_succulent(category: &str) -> bool {
    let category = category.to_lowercase();
    category.contains("succulent") || category.contains("cactus")
}

/// Only categories naming succulents get the long fertilizing interval;
/// a plain "Cactus" category keeps the standard one.
fn fertilizing_days(category: &str) -> u32 {
    if category.to_lowercase().contains("succulent") {
        SUCCULENT_FERTILIZING_DAYS
    } else {
        FERTILIZING_DAYS
    }
}

/// Build a profile from an open-catalog record.
pub fn profile_from_catalog(
    record: &CatalogRecord,
    heuristics: &WateringHeuristics,
) -> PlantCareProfile {
    let parsed = heuristics.parse(&record.watering, &record.category);

    let species_id = if !record.latin.trim().is_empty() {
        normalize_key(&record.latin)
    } else {
        record
            .common
            .first()
            .map(|n| normalize_key(n))
            .unwrap_or_else(|| "unknown".to_owned())
    };

    PlantCareProfile {
        species_id,
        common_names: record.common.clone(),
        latin_name: non_empty(&record.latin),
        category: non_empty(&record.category),
        watering_frequency_days: parsed.base_frequency_days,
        seasonal_multipliers: parsed.seasonal_multipliers,
        growth_multipliers: GrowthMultipliers::CATALOG,
        fertilizing_frequency_days: fertilizing_days(&record.category),
        repotting_frequency_years: PlantCareProfile::DEFAULT_REPOTTING_YEARS,
        personality: PersonalityArchetype::from_category(&record.category, &record.climate),
        care_tips: care_tips_from_catalog(record),
        provenance: Provenance::CatalogDerived,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Up to [`MAX_CATALOG_TIPS`] tips from light, temperature, climate and
/// category, in that order.
pub fn care_tips_from_catalog(record: &CatalogRecord) -> Vec<String> {
    let mut tips = Vec::new();

    let ideal = record.ideallight.to_lowercase();
    if ideal.contains("direct sunlight") {
        tips.push("Loves bright, direct sunlight - place near a south-facing window".to_owned());
    } else if ideal.contains("bright light") {
        tips.push("Prefers bright, indirect light - avoid direct sun".to_owned());
    } else if record.toleratedlight.to_lowercase().contains("diffused") {
        tips.push("Tolerates lower light conditions - good for darker rooms".to_owned());
    }

    if let Some(min) = record.tempmin.celsius {
        if min > 15.0 {
            tips.push(format!("Keep warm - minimum temperature {min}°C"));
        }
    }
    if let Some(max) = record.tempmax.celsius {
        if max < 25.0 {
            tips.push(format!("Prefers cooler conditions - maximum {max}°C"));
        }
    }

    let climate = record.climate.to_lowercase();
    if climate.contains("humid") {
        tips.push("Loves humidity - consider a humidifier or pebble tray".to_owned());
    } else if climate.contains("tropical") {
        tips.push("Tropical plant - keep warm and provide good air circulation".to_owned());
    }

    let category = record.category.to_lowercase();
    if is_succulent(&category) {
        tips.push("Drought-tolerant - better to underwater than overwater".to_owned());
    } else if category.contains("fern") {
        tips.push("Keep soil consistently moist and provide high humidity".to_owned());
    } else if category.contains("hanging") {
        tips.push("Perfect for hanging baskets or trailing from shelves".to_owned());
    }

    tips.truncate(MAX_CATALOG_TIPS);
    tips
}

/// `value` unless it exceeds `max`, in which case it is dropped with a warning.
fn within_limit(species_id: &str, field: &str, value: Option<u32>, max: u32) -> Option<u32> {
    value.filter(|v| {
        let ok = *v <= max;
        if !ok {
            warn!(species_id, field, value = *v, max, "curated value out of range; ignoring");
        }
        ok
    })
}

/// Build a profile from a curated entry, filling gaps with system defaults.
pub fn profile_from_curated(species_id: &str, entry: &CuratedEntry) -> PlantCareProfile {
    let base = within_limit(
        species_id,
        "watering.frequency_days",
        entry.watering.frequency_days,
        MAX_CURATED_FREQUENCY_DAYS,
    )
    .filter(|d| *d > 0)
    .unwrap_or(PlantCareProfile::DEFAULT_WATERING_DAYS);

    let mut seasonal = SeasonalMultipliers::NEUTRAL;
    for (name, adjustment) in &entry.watering.seasonal_adjustments {
        let Ok(season) = name.parse::<Season>() else {
            warn!(species_id, season = %name, "ignoring unknown season in curated profile");
            continue;
        };
        // A bare frequency is turned back into a multiplier of the base.
        let multiplier = adjustment.multiplier.or_else(|| {
            within_limit(
                species_id,
                "seasonal_adjustments.frequency_days",
                adjustment.frequency_days,
                MAX_CURATED_FREQUENCY_DAYS,
            )
            .map(|days| f64::from(days) / f64::from(base))
        });
        if let Some(m) = multiplier {
            seasonal = seasonal.with(season, m);
        }
    }

    let mut growth = GrowthMultipliers::NEUTRAL;
    for (name, adjustment) in &entry.watering.growth_stage_adjustments {
        let Ok(stage) = name.parse::<GrowthStage>() else {
            warn!(species_id, stage = %name, "ignoring unknown growth stage in curated profile");
            continue;
        };
        if let Some(m) = adjustment.multiplier {
            match stage {
                GrowthStage::NewPlant => growth.new_plant = m,
                GrowthStage::Established => growth.established = m,
                GrowthStage::Mature => growth.mature = m,
            }
        }
    }

    let personality = match entry.personality.as_deref() {
        Some(id) => id.parse().unwrap_or_else(|e| {
            warn!(species_id, error = %e, "unknown personality; using default");
            PersonalityArchetype::default()
        }),
        None => PersonalityArchetype::default(),
    };

    PlantCareProfile {
        species_id: species_id.to_owned(),
        common_names: entry.common_names.clone(),
        latin_name: entry.latin_name.clone(),
        category: entry.category.clone(),
        watering_frequency_days: base,
        seasonal_multipliers: seasonal,
        growth_multipliers: growth,
        fertilizing_frequency_days: within_limit(
            species_id,
            "fertilizing.frequency_days",
            entry.fertilizing.frequency_days,
            MAX_CURATED_FREQUENCY_DAYS,
        )
        .filter(|d| *d > 0)
        .unwrap_or(PlantCareProfile::DEFAULT_FERTILIZING_DAYS),
        repotting_frequency_years: within_limit(
            species_id,
            "repotting.frequency_years",
            entry.repotting.frequency_years,
            MAX_CURATED_REPOTTING_YEARS,
        )
        .unwrap_or(PlantCareProfile::DEFAULT_REPOTTING_YEARS),
        personality,
        care_tips: entry.care_tips.clone(),
        provenance: Provenance::Curated,
    }
}
