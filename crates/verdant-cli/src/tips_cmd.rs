//! `verdant tips`: seasonal care notes.

use anyhow::Result;

use verdant_core::{CareScheduleEngine, Season, SeasonalCareTips};

use crate::output::print_json;

/// Print the calendar notes for `season`, or the current season.
pub fn run_tips(engine: &CareScheduleEngine, season: Option<Season>, json: bool) -> Result<()> {
    let tips = engine.seasonal_care_tips(season);
    if json {
        return print_json(&tips);
    }
    print!("{}", render_tips(&tips));
    Ok(())
}

pub fn render_tips(tips: &SeasonalCareTips) -> String {
    let mut out = format!("Season: {}\n", tips.season);
    match &tips.general_notes {
        Some(notes) => out.push_str(&format!("{notes}\n")),
        None if tips.tasks.is_empty() => out.push_str("No seasonal notes.\n"),
        None => {}
    }
    for task in &tips.tasks {
        out.push_str(&format!("  - {task}\n"));
    }
    out
}
