//! `verdant lookup` and `verdant parse-watering`: inspect the knowledge base.

use std::fmt::Write as _;

use anyhow::Result;
use serde_json::json;

use verdant_core::knowledge::LookupStep;
use verdant_core::{PlantCareProfile, PlantKnowledgeBase, Provenance, WateringHeuristics};

use crate::output::{list_or_none, print_json};

// -----------------------------------------------------------------------
// verdant lookup <name>
// -----------------------------------------------------------------------

/// Resolve `name` and print the profile it maps to. An unknown name prints
/// the system default profile.
pub fn run_lookup(knowledge: &PlantKnowledgeBase, name: &str, json: bool) -> Result<()> {
    let found = knowledge.lookup_with_step(name);

    if json {
        let (profile, step) = match found {
            Some((profile, step)) => (profile, Some(step)),
            None => (knowledge.default_profile(), None),
        };
        return print_json(&json!({
            "query": name,
            "step": step,
            "profile": profile,
        }));
    }

    match found {
        Some((profile, step)) => print!("{}", render_profile(profile, Some(step))),
        None => {
            println!("No profile found for '{name}'; the default profile applies.");
            println!();
            print!("{}", render_profile(knowledge.default_profile(), None));
        }
    }
    Ok(())
}

fn provenance_label(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Curated => "curated",
        Provenance::CatalogDerived => "catalog",
        Provenance::SystemDefault => "default",
    }
}

fn step_label(step: LookupStep) -> &'static str {
    match step {
        LookupStep::CuratedKey => "species key",
        LookupStep::CuratedAlias => "curated common name",
        LookupStep::CatalogExact => "catalog name",
        LookupStep::CatalogSubstring => "partial catalog name",
    }
}

/// Human-readable profile card.
pub fn render_profile(profile: &PlantCareProfile, step: Option<LookupStep>) -> String {
    let mut out = String::new();

    let source = match step {
        Some(step) => format!(
            "{}, matched by {}",
            provenance_label(profile.provenance),
            step_label(step)
        ),
        None => provenance_label(profile.provenance).to_string(),
    };
    let _ = writeln!(out, "Species: {} ({source})", profile.species_id);
    let _ = writeln!(out, "Common names: {}", list_or_none(&profile.common_names));
    if let Some(latin) = &profile.latin_name {
        let _ = writeln!(out, "Latin name: {latin}");
    }
    if let Some(category) = &profile.category {
        let _ = writeln!(out, "Category: {category}");
    }

    let s = &profile.seasonal_multipliers;
    let _ = writeln!(
        out,
        "Watering: every {} days (spring x{:.2}, summer x{:.2}, fall x{:.2}, winter x{:.2})",
        profile.watering_frequency_days, s.spring, s.summer, s.fall, s.winter
    );
    let g = &profile.growth_multipliers;
    let _ = writeln!(
        out,
        "Growth stages: new x{:.2}, established x{:.2}, mature x{:.2}",
        g.new_plant, g.established, g.mature
    );
    let _ = writeln!(out, "Fertilizing: every {} days", profile.fertilizing_frequency_days);
    let _ = writeln!(out, "Repotting: every {} years", profile.repotting_frequency_years);
    let _ = writeln!(out, "Personality: {}", profile.personality);

    if !profile.care_tips.is_empty() {
        let _ = writeln!(out, "Tips:");
        for tip in &profile.care_tips {
            let _ = writeln!(out, "  - {tip}");
        }
    }
    out
}

// -----------------------------------------------------------------------
// verdant parse-watering <text>
// -----------------------------------------------------------------------

/// Run the watering heuristics over a free-text description.
pub fn run_parse_watering(
    heuristics: &WateringHeuristics,
    text: &str,
    category: &str,
    json: bool,
) -> Result<()> {
    let parsed = heuristics.parse(text, category);

    if json {
        return print_json(&json!({
            "text": text,
            "category": category,
            "base_frequency_days": parsed.base_frequency_days,
            "seasonal_multipliers": parsed.seasonal_multipliers,
            "matched_rule": parsed.matched_rule,
        }));
    }

    let s = parsed.seasonal_multipliers;
    println!("Base frequency: every {} days", parsed.base_frequency_days);
    println!(
        "Matched rule: {}",
        parsed.matched_rule.as_deref().unwrap_or("none (category default)")
    );
    println!(
        "Seasonal: spring x{:.2}, summer x{:.2}, fall x{:.2}, winter x{:.2}",
        s.spring, s.summer, s.fall, s.winter
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_card_has_no_match_source() {
        let card = render_profile(&PlantCareProfile::system_default(), None);
        assert!(card.starts_with("Species: unknown (default)\n"), "got: {card}");
        assert!(card.contains("Common names: none"), "got: {card}");
        assert!(card.contains("Watering: every 7 days"), "got: {card}");
        assert!(card.contains("Fertilizing: every 60 days"), "got: {card}");
        assert!(card.contains("Repotting: every 2 years"), "got: {card}");
        assert!(!card.contains("Tips:"), "got: {card}");
    }

    #[test]
    fn bundled_curated_card_names_the_step() {
        let knowledge = PlantKnowledgeBase::bundled();
        let (profile, step) = knowledge.lookup_with_step("Snake Plant").unwrap();
        let card = render_profile(profile, Some(step));
        assert!(
            card.starts_with("Species: snake_plant (curated, matched by species key)"),
            "got: {card}"
        );
        assert!(card.contains("Tips:\n  - "), "got: {card}");
    }
}
