//! Care scheduling and text care-action interpretation for house plants.
//!
//! Build a [`PlantKnowledgeBase`] once, share it behind an `Arc`, and hand it
//! to a [`CareScheduleEngine`] and a [`TextCareInterpreter`].

pub mod care;
pub mod config;
pub mod interpret;
pub mod knowledge;
pub mod personality;
pub mod schedule;
pub mod watering;

pub use care::{CareActionType, CareType, GrowthStage, Hemisphere, ParseEnumError, Season};
pub use config::KnowledgeConfig;
pub use interpret::{CareInterpretation, PlantIdentity, PlantResolution, TextCareInterpreter};
pub use knowledge::{PlantCareProfile, PlantKnowledgeBase, Provenance};
pub use personality::PersonalityArchetype;
pub use schedule::{
    CareReminder, CareSchedule, CareScheduleEngine, Clock, EngineConfig, PlantSnapshot,
    SeasonalCareTips, SystemClock, Urgency,
};
pub use watering::{ParsedWatering, WateringHeuristics};
