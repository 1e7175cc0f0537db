//! Schedule generation against the fixture knowledge base.

use std::sync::Arc;

use chrono::Duration;

use verdant_core::care::{GrowthStage, Hemisphere, Season};
use verdant_core::knowledge::Provenance;
use verdant_core::schedule::{CareScheduleEngine, EngineConfig, PlantSnapshot};
use verdant_core::{PersonalityArchetype, WateringHeuristics};
use verdant_test_utils::{FixedClock, days_before, fixture_knowledge, utc};

fn engine_at(now: chrono::DateTime<chrono::Utc>) -> CareScheduleEngine {
    CareScheduleEngine::new(fixture_knowledge()).with_clock(FixedClock::new(now))
}

#[test]
fn new_plant_in_winter_waters_every_21_days() {
    let now = utc(2026, 1, 20, 12);
    let plant = PlantSnapshot::new("p1")
        .nickname("Spike")
        .species("Snake Plant")
        .last_watered(days_before(now, 15))
        .entered_care_at(days_before(now, 10));

    let schedule = engine_at(now).generate_schedule(&plant);

    assert_eq!(schedule.season, Season::Winter);
    assert_eq!(schedule.growth_stage, GrowthStage::NewPlant);
    // floor(14 * 1.3 * 1.2) = floor(21.84)
    assert_eq!(schedule.watering_frequency_days, 21);
    assert_eq!(schedule.next_watering, days_before(now, 15) + Duration::days(21));
    assert_eq!(schedule.species_id, "snake_plant");
    assert_eq!(schedule.provenance, Provenance::Curated);
    assert_eq!(schedule.personality, PersonalityArchetype::SarcasticSurvivor);
    assert_eq!(schedule.plant_name, "Spike");
}

#[test]
fn mature_plant_in_summer() {
    let now = utc(2026, 7, 1, 8);
    let plant = PlantSnapshot::new("p1")
        .species("snake_plant")
        .last_watered(days_before(now, 2))
        .entered_care_at(days_before(now, 400));

    let schedule = engine_at(now).generate_schedule(&plant);

    assert_eq!(schedule.growth_stage, GrowthStage::Mature);
    // floor(14 * 0.8 * 0.9) = floor(10.08)
    assert_eq!(schedule.watering_frequency_days, 10);
}

#[test]
fn schedule_is_idempotent_within_a_day() {
    let plant = PlantSnapshot::new("p1")
        .species("Boston Fern")
        .last_watered(utc(2026, 3, 1, 7))
        .entered_care_at(utc(2026, 2, 10, 18));

    let morning = engine_at(utc(2026, 3, 2, 0)).generate_schedule(&plant);
    let again = engine_at(utc(2026, 3, 2, 0)).generate_schedule(&plant);
    let evening = engine_at(utc(2026, 3, 2, 23)).generate_schedule(&plant);

    assert_eq!(morning, again);
    assert_eq!(morning, evening);
}

#[test]
fn unknown_species_uses_system_default() {
    let now = utc(2026, 4, 15, 12);
    let plant = PlantSnapshot::new("p9")
        .species("Audrey II")
        .last_watered(days_before(now, 1))
        .entered_care_at(days_before(now, 100));

    let schedule = engine_at(now).generate_schedule(&plant);

    assert_eq!(schedule.provenance, Provenance::SystemDefault);
    assert_eq!(schedule.species_id, "unknown");
    assert_eq!(schedule.watering_frequency_days, 7);
    assert_eq!(schedule.personality, PersonalityArchetype::ChillFriend);
    assert!(schedule.care_tips.is_empty());
    assert_eq!(schedule.next_repotting, days_before(now, 100) + Duration::days(2 * 365));
}

#[test]
fn missing_species_still_schedules() {
    let now = utc(2026, 4, 15, 12);
    let schedule = engine_at(now).generate_schedule(&PlantSnapshot::new("bare"));
    assert_eq!(schedule.plant_name, "Your plant");
    assert!(schedule.watering_frequency_days >= 1);
}

#[test]
fn fertilizing_grace_period_and_history() {
    let now = utc(2026, 5, 10, 15);
    let never = PlantSnapshot::new("a").species("Snake Plant");
    let fed = PlantSnapshot::new("b")
        .species("Snake Plant")
        .last_fertilized(utc(2026, 4, 1, 9));

    let engine = engine_at(now);
    assert_eq!(
        engine.generate_schedule(&never).next_fertilizing,
        utc(2026, 5, 24, 0)
    );
    assert_eq!(
        engine.generate_schedule(&fed).next_fertilizing,
        utc(2026, 4, 1, 9) + Duration::days(60)
    );

    let longer = engine_at(now).with_config(EngineConfig::default().fertilizing_grace_days(30));
    assert_eq!(
        longer.generate_schedule(&never).next_fertilizing,
        utc(2026, 6, 9, 0)
    );
}

#[test]
fn repotting_uses_profile_years() {
    let now = utc(2026, 5, 10, 15);
    let entered = utc(2025, 1, 1, 0);
    let plant = PlantSnapshot::new("a")
        .species("Mother-in-law's Tongue")
        .entered_care_at(entered);
    let schedule = engine_at(now).generate_schedule(&plant);
    assert_eq!(schedule.next_repotting, entered + Duration::days(3 * 365));
}

#[test]
fn care_tips_are_capped() {
    let now = utc(2026, 5, 10, 15);
    let plant = PlantSnapshot::new("a").species("Snake Plant");

    let schedule = engine_at(now).generate_schedule(&plant);
    assert_eq!(
        schedule.care_tips,
        ["Let it dry out", "Low light is fine", "Do not overwater"]
    );

    let one = engine_at(now).with_config(EngineConfig::default().max_care_tips(1));
    assert_eq!(one.generate_schedule(&plant).care_tips.len(), 1);
}

#[test]
fn catalog_species_use_catalog_growth_multipliers() {
    let now = utc(2026, 4, 15, 12);
    let plant = PlantSnapshot::new("a")
        .species("Variegated Carabbean Agave")
        .last_watered(days_before(now, 1))
        .entered_care_at(days_before(now, 3));

    let schedule = engine_at(now).generate_schedule(&plant);
    assert_eq!(schedule.provenance, Provenance::CatalogDerived);
    assert_eq!(schedule.personality, PersonalityArchetype::SarcasticSurvivor);
    // Spring 0.9, new plant 1.2: floor(14 * 0.9 * 1.2) = floor(15.12)
    assert_eq!(schedule.watering_frequency_days, 15);
}

#[test]
fn southern_hemisphere_schedules_for_its_own_season() {
    let now = utc(2026, 7, 10, 12);
    let plant = PlantSnapshot::new("a")
        .species("Snake Plant")
        .entered_care_at(days_before(now, 100));
    let engine = engine_at(now).with_config(EngineConfig::default().hemisphere(Hemisphere::Southern));
    let schedule = engine.generate_schedule(&plant);
    assert_eq!(schedule.season, Season::Winter);
    // floor(14 * 1.3 * 1.0)
    assert_eq!(schedule.watering_frequency_days, 18);
}

#[test]
fn adjusted_frequency_is_always_positive() {
    let engine = engine_at(utc(2026, 7, 10, 12));
    let species = [
        "Snake Plant",
        "Boston Fern",
        "Maindenhair",
        "Scarlet star",
        "Variegated Carabbean Agave",
        "nothing known",
    ];
    for name in species {
        for days_in_care in [0, 27, 28, 364, 365, 2000] {
            let plant = PlantSnapshot::new("x")
                .species(name)
                .entered_care_at(days_before(engine.now(), days_in_care));
            let schedule = engine.generate_schedule(&plant);
            assert!(
                schedule.watering_frequency_days >= 1,
                "{name} after {days_in_care} days"
            );
        }
    }
}

#[test]
fn watering_phrases_respect_their_bands() {
    let heuristics = WateringHeuristics::bundled();
    let categories = ["", "Foliage plant", "Fern", "Cactus And Succulent", "Palm"];

    for category in categories {
        let dry = heuristics.parse("Only water when soil is completely dry", category);
        let wet = heuristics.parse("Keep soil consistently moist", category);
        if !category.contains("Fern") {
            assert!(dry.base_frequency_days >= 10, "drought in {category:?}");
        }
        if !category.contains("Succulent") {
            assert!(wet.base_frequency_days <= 5, "moist in {category:?}");
        }
    }
}

#[test]
fn seasonal_care_tips_follow_the_calendar() {
    let engine = engine_at(utc(2026, 1, 5, 12));

    let current = engine.seasonal_care_tips(None);
    assert_eq!(current.season, Season::Winter);
    assert_eq!(current.general_notes.as_deref(), Some("Water less"));

    let summer = engine.seasonal_care_tips(Some(Season::Summer));
    assert_eq!(summer.tasks, ["Check soil often", "Watch for pests"]);

    let spring = engine.seasonal_care_tips(Some(Season::Spring));
    assert!(spring.tasks.is_empty());
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CareScheduleEngine>();

    let now = utc(2026, 1, 20, 12);
    let engine = Arc::new(engine_at(now));
    let plant = PlantSnapshot::new("p1")
        .species("Snake Plant")
        .last_watered(days_before(now, 3))
        .entered_care_at(days_before(now, 50));
    let expected = engine.generate_schedule(&plant);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| engine.generate_schedule(&plant)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn oversized_curated_intervals_do_not_overflow_dates() {
    let knowledge = verdant_core::PlantKnowledgeBase::builder()
        .curated_json(
            r#"{"plants": {"big": {
                "watering": {"frequency_days": 4000000000},
                "fertilizing": {"frequency_days": 4000000000},
                "repotting": {"frequency_years": 4000000000}
            }}}"#,
        )
        .build();
    let now = utc(2026, 4, 10, 9);
    let engine = CareScheduleEngine::new(Arc::new(knowledge)).with_clock(FixedClock::new(now));
    let plant = PlantSnapshot::new("p1")
        .species("big")
        .last_watered(days_before(now, 1))
        .last_fertilized(days_before(now, 1))
        .entered_care_at(days_before(now, 400));

    let schedule = engine.generate_schedule(&plant);

    assert_eq!(schedule.provenance, Provenance::Curated);
    assert_eq!(schedule.next_fertilizing, days_before(now, 1) + Duration::days(60));
    assert_eq!(schedule.next_repotting, days_before(now, 400) + Duration::days(730));
    assert!(engine.due_reminders(&[plant]).is_empty());
}

#[test]
fn snapshots_at_the_edge_of_the_calendar_saturate() {
    let now = chrono::DateTime::<chrono::Utc>::MAX_UTC;
    let plant = PlantSnapshot::new("p1")
        .species("Snake Plant")
        .last_watered(now)
        .last_fertilized(now)
        .entered_care_at(now);

    let schedule = engine_at(now).generate_schedule(&plant);

    assert_eq!(schedule.next_watering, now);
    assert_eq!(schedule.next_repotting, now);
}
