//! `verdant interpret`: read a care message against a plant collection.

use anyhow::Result;

use verdant_core::{CareInterpretation, PlantIdentity, PlantSnapshot, TextCareInterpreter};

use crate::output::print_json;

/// Interpret `message` as a report about one of `plants`.
pub fn run_interpret(
    interpreter: &TextCareInterpreter,
    plants: &[PlantSnapshot],
    message: &str,
    json: bool,
) -> Result<()> {
    let candidates: Vec<PlantIdentity> = plants.iter().map(PlantIdentity::from).collect();
    let interpretation = interpreter.interpret(message, &candidates);

    if json {
        return print_json(&interpretation);
    }
    println!("{}", render_interpretation(&interpretation));
    Ok(())
}

/// Human-readable outcome of an interpretation.
pub fn render_interpretation(interpretation: &CareInterpretation) -> String {
    match interpretation {
        CareInterpretation::NoPlants => "No plants in collection.".to_string(),
        CareInterpretation::NoActionDetected => "No care action found in message.".to_string(),
        CareInterpretation::PlantNotIdentified { action, candidates } => {
            let mut out = format!("Detected {action}, but not which plant. Candidates:");
            for plant in candidates {
                out.push_str(&format!("\n  - {} [{}]", plant.nickname, plant.id));
            }
            out
        }
        CareInterpretation::Recognized { plant, action } => {
            format!("Recorded {action} for {} [{}].", plant.nickname, plant.id)
        }
    }
}
