//! Free-text watering heuristics.
//!
//! Turns descriptions such as "Water only when the soil is completely dry"
//! plus a plant category into a base watering frequency and seasonal
//! multipliers. The phrase table lives in `watering_rules.toml`, which is
//! embedded in the binary at compile time; [`WateringHeuristics::from_toml`]
//! accepts a replacement table for tuning.
//!
//! Parsing happens in two stages: phrase rules pick a base frequency (or a
//! category default when nothing matches), then category bounds clamp the
//! result.

use serde::Deserialize;
use thiserror::Error;

use crate::care::Season;
use crate::knowledge::profile::SeasonalMultipliers;

/// The embedded rule table.
static RULES_TOML: &str = include_str!("watering_rules.toml");

/// Errors raised while loading a rule table.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("rule {0:?} has no phrases")]
    EmptyRule(String),

    #[error("rule {rule:?} has a zero base frequency")]
    ZeroFrequency { rule: String },

    #[error("category bound for {categories:?} has min_days {min} above max_days {max}")]
    InvertedBound {
        categories: Vec<String>,
        min: u32,
        max: u32,
    },
}

/// One phrase rule.
#[derive(Debug, Clone, Deserialize)]
pub struct PhraseRule {
    pub name: String,
    pub phrases: Vec<String>,
    pub base_frequency_days: u32,
    #[serde(default)]
    pub seasonal_overrides: SeasonOverrides,
}

/// Per-season multipliers a rule swaps into the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonOverrides {
    pub spring: Option<f64>,
    pub summer: Option<f64>,
    pub fall: Option<f64>,
    pub winter: Option<f64>,
}

impl SeasonOverrides {
    fn apply(&self, base: SeasonalMultipliers) -> SeasonalMultipliers {
        let mut out = base;
        for season in Season::ALL {
            let value = match season {
                Season::Spring => self.spring,
                Season::Summer => self.summer,
                Season::Fall => self.fall,
                Season::Winter => self.winter,
            };
            if let Some(multiplier) = value {
                out = out.with(season, multiplier);
            }
        }
        out
    }
}

/// Base frequency for categories when no phrase rule fires.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefault {
    pub categories: Vec<String>,
    pub base_frequency_days: u32,
}

/// Floor and/or ceiling applied to a category after phrase matching.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryBound {
    pub categories: Vec<String>,
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
}

fn category_matches(category: &str, keys: &[String]) -> bool {
    keys.iter().any(|k| category.contains(&k.to_lowercase()))
}

/// A loaded watering rule table.
#[derive(Debug, Clone, Deserialize)]
pub struct WateringHeuristics {
    fallback_base_frequency_days: u32,
    default_seasonal: SeasonalMultipliers,
    rules: Vec<PhraseRule>,
    #[serde(default)]
    category_defaults: Vec<CategoryDefault>,
    #[serde(default)]
    category_bounds: Vec<CategoryBound>,
}

/// Result of parsing one watering description.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWatering {
    pub base_frequency_days: u32,
    pub seasonal_multipliers: SeasonalMultipliers,
    /// Name of the phrase rule that fired, `None` when the category default
    /// or the fallback decided.
    pub matched_rule: Option<String>,
}

impl WateringHeuristics {
    /// The rule table compiled into the crate.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The file is part of the
    /// source tree and covered by tests, so a built binary always has a
    /// valid table.
    pub fn bundled() -> Self {
        Self::from_toml(RULES_TOML).expect("embedded watering_rules.toml is invalid")
    }

    /// Load and validate a rule table from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RulesError> {
        let table: Self = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), RulesError> {
        for rule in &self.rules {
            if rule.phrases.iter().all(|p| p.trim().is_empty()) {
                return Err(RulesError::EmptyRule(rule.name.clone()));
            }
            if rule.base_frequency_days == 0 {
                return Err(RulesError::ZeroFrequency {
                    rule: rule.name.clone(),
                });
            }
        }
        for bound in &self.category_bounds {
            if let (Some(min), Some(max)) = (bound.min_days, bound.max_days) {
                if min > max {
                    return Err(RulesError::InvertedBound {
                        categories: bound.categories.clone(),
                        min,
                        max,
                    });
                }
            }
        }
        Ok(())
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[PhraseRule] {
        &self.rules
    }

    /// Parse a watering description for a plant of the given category.
    pub fn parse(&self, free_text: &str, category: &str) -> ParsedWatering {
        let text = free_text.to_lowercase();
        let category = category.to_lowercase();

        let matched = self.rules.iter().find(|rule| {
            rule.phrases
                .iter()
                .filter(|p| !p.trim().is_empty())
                .any(|p| text.contains(&p.to_lowercase()))
        });

        let (base, seasonal, matched_rule) = match matched {
            Some(rule) => (
                rule.base_frequency_days,
                rule.seasonal_overrides.apply(self.default_seasonal),
                Some(rule.name.clone()),
            ),
            None => {
                let base = self
                    .category_defaults
                    .iter()
                    .find(|d| category_matches(&category, &d.categories))
                    .map(|d| d.base_frequency_days)
                    .unwrap_or(self.fallback_base_frequency_days);
                (base, self.default_seasonal, None)
            }
        };

        let base = self.clamp_for_category(base, &category);

        ParsedWatering {
            base_frequency_days: base.max(1),
            seasonal_multipliers: seasonal,
            matched_rule,
        }
    }

    fn clamp_for_category(&self, base: u32, category: &str) -> u32 {
        match self
            .category_bounds
            .iter()
            .find(|b| category_matches(category, &b.categories))
        {
            Some(bound) => {
                let mut days = base;
                if let Some(min) = bound.min_days {
                    days = days.max(min);
                }
                if let Some(max) = bound.max_days {
                    days = days.min(max);
                }
                days
            }
            None => base,
        }
    }
}

impl Default for WateringHeuristics {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, category: &str) -> ParsedWatering {
        WateringHeuristics::bundled().parse(text, category)
    }

    #[test]
    fn bundled_table_loads() {
        let rules = WateringHeuristics::bundled();
        let names: Vec<&str> = rules.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            ["drought_tolerant", "moisture_loving", "moderate", "vessel_watered"]
        );
    }

    #[test]
    fn drought_phrases_give_long_intervals() {
        let parsed = parse("Only water when soil is completely dry", "");
        assert_eq!(parsed.base_frequency_days, 14);
        assert_eq!(parsed.seasonal_multipliers.winter, 1.5);
        assert_eq!(parsed.seasonal_multipliers.summer, 0.8);
        assert_eq!(parsed.matched_rule.as_deref(), Some("drought_tolerant"));
    }

    #[test]
    fn moisture_phrases_give_short_intervals() {
        let parsed = parse("Keep soil consistently moist", "");
        assert_eq!(parsed.base_frequency_days, 4);
        assert_eq!(parsed.seasonal_multipliers.summer, 0.7);
        assert_eq!(parsed.seasonal_multipliers.winter, 1.3);
    }

    #[test]
    fn drought_rule_wins_over_later_rules() {
        // "must be dry" (drought) is tested before "regularly" (moderate).
        let parsed = parse("Water regularly, but the top must be dry", "");
        assert_eq!(parsed.base_frequency_days, 14);
    }

    #[test]
    fn must_not_be_dry_is_moisture_loving() {
        let parsed = parse("The soil must not be dry", "");
        assert_eq!(parsed.matched_rule.as_deref(), Some("moisture_loving"));
    }

    #[test]
    fn moderate_phrases() {
        let parsed = parse("Water when half dry", "Foliage plant");
        assert_eq!(parsed.base_frequency_days, 7);
        assert_eq!(parsed.seasonal_multipliers, WateringHeuristics::bundled().default_seasonal);
    }

    #[test]
    fn vessel_phrases() {
        let parsed = parse("Change water in vase weekly", "Bromeliad");
        assert_eq!(parsed.base_frequency_days, 5);
        assert_eq!(parsed.seasonal_multipliers.winter, 1.2);
    }

    #[test]
    fn category_defaults_when_no_phrase_matches() {
        assert_eq!(parse("", "Cactus And Succulent").base_frequency_days, 14);
        assert_eq!(parse("", "Fern").base_frequency_days, 4);
        assert_eq!(parse("", "Palm").base_frequency_days, 7);
        assert_eq!(parse("whenever", "").matched_rule, None);
    }

    #[test]
    fn succulents_are_clamped_up() {
        let parsed = parse("Keep moist", "Succulent");
        assert_eq!(parsed.base_frequency_days, 10);
    }

    #[test]
    fn ferns_are_clamped_down() {
        let parsed = parse("Water only when dry to the touch", "Fern");
        assert_eq!(parsed.base_frequency_days, 5);
    }

    #[test]
    fn custom_table_is_validated() {
        let err = WateringHeuristics::from_toml(
            r#"
fallback_base_frequency_days = 7
default_seasonal = { spring = 1.0, summer = 1.0, fall = 1.0, winter = 1.0 }

[[rules]]
name = "broken"
phrases = []
base_frequency_days = 3
"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, RulesError::EmptyRule(ref n) if n == "broken"),
            "expected EmptyRule, got: {err}"
        );
    }

    #[test]
    fn custom_table_inverted_bound_rejected() {
        let err = WateringHeuristics::from_toml(
            r#"
fallback_base_frequency_days = 7
default_seasonal = { spring = 1.0, summer = 1.0, fall = 1.0, winter = 1.0 }
rules = []

[[category_bounds]]
categories = ["orchid"]
min_days = 9
max_days = 3
"#,
        )
        .unwrap_err();
        assert!(matches!(err, RulesError::InvertedBound { .. }), "got: {err}");
    }

    #[test]
    fn custom_table_changes_results() {
        let table = WateringHeuristics::from_toml(
            r#"
fallback_base_frequency_days = 9
default_seasonal = { spring = 1.0, summer = 1.0, fall = 1.0, winter = 2.0 }

[[rules]]
name = "soggy"
phrases = ["bog"]
base_frequency_days = 2
"#,
        )
        .unwrap();
        assert_eq!(table.parse("a bog plant", "").base_frequency_days, 2);
        let fallback = table.parse("no hints", "");
        assert_eq!(fallback.base_frequency_days, 9);
        assert_eq!(fallback.seasonal_multipliers.winter, 2.0);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = WateringHeuristics::from_toml("not [valid").unwrap_err();
        assert!(matches!(err, RulesError::TomlError(_)));
    }
}
