//! Due reminders across a plant collection.

use chrono::Duration;

use verdant_core::care::CareType;
use verdant_core::schedule::{CareScheduleEngine, PlantSnapshot, Urgency};
use verdant_test_utils::{FixedClock, days_before, fixture_knowledge, utc};

fn collection(now: chrono::DateTime<chrono::Utc>) -> Vec<PlantSnapshot> {
    vec![
        // New snake plant in winter: 21-day interval, 4 days overdue.
        PlantSnapshot::new("spike")
            .nickname("Spike")
            .species("Snake Plant")
            .last_watered(days_before(now, 25))
            .entered_care_at(days_before(now, 10)),
        // Boston fern, established, winter: floor(3 * 1.0 * 1.0) = 3, 7 days
        // overdue. Fertilized 45 days ago on a 30-day cycle.
        PlantSnapshot::new("fern")
            .nickname("Fernando")
            .species("Boston Fern")
            .last_watered(days_before(now, 10))
            .entered_care_at(days_before(now, 60))
            .last_fertilized(days_before(now, 45)),
        // Watered yesterday; nothing due.
        PlantSnapshot::new("fresh")
            .nickname("Sammy")
            .species("Snake Plant")
            .last_watered(days_before(now, 1))
            .entered_care_at(days_before(now, 200)),
    ]
}

#[test]
fn only_overdue_entries_are_reported() {
    let now = utc(2026, 1, 20, 12);
    let engine = CareScheduleEngine::new(fixture_knowledge()).with_clock(FixedClock::new(now));

    let reminders = engine.due_reminders(&collection(now));

    let summary: Vec<(&str, CareType, i64, Urgency)> = reminders
        .iter()
        .map(|r| (r.plant_id.as_str(), r.care_type, r.days_overdue, r.urgency))
        .collect();
    assert_eq!(
        summary,
        [
            ("fern", CareType::Fertilizing, 15, Urgency::Medium),
            ("fern", CareType::Watering, 7, Urgency::Critical),
            ("spike", CareType::Watering, 4, Urgency::High),
        ]
    );
}

#[test]
fn reminders_are_sorted_and_never_in_the_future() {
    let now = utc(2026, 1, 20, 12);
    let engine = CareScheduleEngine::new(fixture_knowledge()).with_clock(FixedClock::new(now));

    let reminders = engine.due_reminders(&collection(now));

    assert!(!reminders.is_empty());
    assert!(reminders.iter().all(|r| r.due_date <= now));
    assert!(reminders.windows(2).all(|w| w[0].due_date <= w[1].due_date));
}

#[test]
fn due_exactly_now_is_low() {
    let now = utc(2026, 4, 10, 9);
    let engine = CareScheduleEngine::new(fixture_knowledge()).with_clock(FixedClock::new(now));
    let plant = PlantSnapshot::new("x")
        .species("Triffid")
        .last_watered(days_before(now, 7))
        .entered_care_at(days_before(now, 100));

    let reminders = engine.due_reminders(&[plant]);

    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].due_date, now);
    assert_eq!(reminders[0].days_overdue, 0);
    assert_eq!(reminders[0].urgency, Urgency::Low);
}

#[test]
fn messages_use_the_first_archetype_template() {
    let now = utc(2026, 1, 20, 12);
    let engine = CareScheduleEngine::new(fixture_knowledge()).with_clock(FixedClock::new(now));

    let reminders = engine.due_reminders(&collection(now));
    let spike = reminders.iter().find(|r| r.plant_id == "spike").unwrap();
    assert_eq!(spike.message, "Spike survived 4 days. Water, maybe?");

    let fern_water = reminders
        .iter()
        .find(|r| r.plant_id == "fern" && r.care_type == CareType::Watering)
        .unwrap();
    assert_eq!(fern_water.message, "Fernando is WILTING after 7 days!");

    // No fertilizing template for this archetype.
    let fern_feed = reminders
        .iter()
        .find(|r| r.plant_id == "fern" && r.care_type == CareType::Fertilizing)
        .unwrap();
    assert_eq!(fern_feed.message, "Time to take care of Fernando!");
}

#[test]
fn notifiable_reminders_drop_low_urgency() {
    let now = utc(2026, 1, 20, 12);
    let clock = FixedClock::new(now);
    let engine = CareScheduleEngine::new(fixture_knowledge()).with_clock(clock.clone());
    let mut plants = collection(now);
    plants.push(
        PlantSnapshot::new("just-due")
            .species("Triffid")
            .last_watered(days_before(now, 7))
            .entered_care_at(days_before(now, 100)),
    );

    let all = engine.due_reminders(&plants);
    let notifiable = engine.notifiable_reminders(&plants);

    assert!(all.iter().any(|r| r.plant_id == "just-due"));
    assert!(notifiable.iter().all(|r| r.urgency >= Urgency::Medium));
    assert!(!notifiable.iter().any(|r| r.plant_id == "just-due"));
    assert_eq!(notifiable.len(), all.len() - 1);

    // A week later the same plant is critical and worth a message.
    clock.advance(Duration::days(7));
    let later = engine.notifiable_reminders(&plants);
    let just_due = later.iter().find(|r| r.plant_id == "just-due").unwrap();
    assert_eq!(just_due.urgency, Urgency::Critical);
}

#[test]
fn empty_collection_has_no_reminders() {
    let engine = CareScheduleEngine::new(fixture_knowledge())
        .with_clock(FixedClock::new(utc(2026, 1, 20, 12)));
    assert!(engine.due_reminders(&[]).is_empty());
}
