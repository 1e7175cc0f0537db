//! `verdant schedule` and `verdant reminders`: care plans for a collection.

use anyhow::Result;

use verdant_core::{CareReminder, CareSchedule, CareScheduleEngine, PlantSnapshot, Urgency};

use crate::output::{date, print_json};

// -----------------------------------------------------------------------
// verdant schedule <plants-file>
// -----------------------------------------------------------------------

/// Print the next-due dates for every plant in the collection.
pub fn run_schedule(
    engine: &CareScheduleEngine,
    plants: &[PlantSnapshot],
    json: bool,
) -> Result<()> {
    let now = engine.now();
    let schedules: Vec<CareSchedule> = plants
        .iter()
        .map(|plant| engine.generate_schedule_at(plant, now))
        .collect();

    if json {
        return print_json(&schedules);
    }

    if schedules.is_empty() {
        println!("No plants in collection.");
        return Ok(());
    }

    println!(
        "Season: {} ({} hemisphere)",
        engine.current_season(),
        engine.config().hemisphere
    );
    println!();
    for schedule in &schedules {
        print!("{}", render_schedule(schedule));
        println!();
    }
    Ok(())
}

/// Human-readable block for one schedule.
pub fn render_schedule(schedule: &CareSchedule) -> String {
    let mut lines = vec![
        format!(
            "{} [{}] {} ({}, {})",
            schedule.plant_name,
            schedule.plant_id,
            schedule.species_id,
            schedule.growth_stage,
            schedule.personality
        ),
        format!(
            "  water:     {} (every {} days)",
            date(schedule.next_watering),
            schedule.watering_frequency_days
        ),
        format!("  fertilize: {}", date(schedule.next_fertilizing)),
        format!("  repot:     {}", date(schedule.next_repotting)),
    ];
    lines.extend(schedule.care_tips.iter().map(|tip| format!("  tip: {tip}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// -----------------------------------------------------------------------
// verdant reminders <plants-file>
// -----------------------------------------------------------------------

/// Print the overdue reminders for the collection, oldest first. With
/// `notifiable`, only reminders worth an outbound message are shown.
pub fn run_reminders(
    engine: &CareScheduleEngine,
    plants: &[PlantSnapshot],
    notifiable: bool,
    json: bool,
) -> Result<()> {
    let reminders = if notifiable {
        engine.notifiable_reminders(plants)
    } else {
        engine.due_reminders(plants)
    };

    if json {
        return print_json(&reminders);
    }

    if reminders.is_empty() {
        println!("Nothing is due.");
        return Ok(());
    }

    println!("Reminders ({}):", reminders.len());
    for reminder in &reminders {
        println!("{}", render_reminder(reminder));
    }
    Ok(())
}

fn urgency_icon(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => ".",
        Urgency::Medium => "-",
        Urgency::High => "!",
        Urgency::Critical => "X",
    }
}

/// One-line summary of a reminder followed by its message.
pub fn render_reminder(reminder: &CareReminder) -> String {
    format!(
        "  [{}] {} {} due {} ({} days overdue, {})\n      {}",
        urgency_icon(reminder.urgency),
        reminder.plant_name,
        reminder.care_type,
        date(reminder.due_date),
        reminder.days_overdue,
        reminder.urgency,
        reminder.message
    )
}
