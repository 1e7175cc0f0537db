//! Personality archetypes and the reminder text they speak in.
//!
//! Archetypes only change wording; they never affect scheduling math.

pub mod templates;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::care::ParseEnumError;

pub use templates::{MessageTemplates, MessageType, render_template};

/// A named personality style for reminder wording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityArchetype {
    SarcasticSurvivor,
    SteadyReliable,
    DramaticCommunicator,
    DramaticDiva,
    HighMaintenanceDiva,
    #[default]
    ChillFriend,
    IndependentSurvivor,
}

impl PersonalityArchetype {
    pub const ALL: [PersonalityArchetype; 7] = [
        Self::SarcasticSurvivor,
        Self::SteadyReliable,
        Self::DramaticCommunicator,
        Self::DramaticDiva,
        Self::HighMaintenanceDiva,
        Self::ChillFriend,
        Self::IndependentSurvivor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SarcasticSurvivor => "sarcastic_survivor",
            Self::SteadyReliable => "steady_reliable",
            Self::DramaticCommunicator => "dramatic_communicator",
            Self::DramaticDiva => "dramatic_diva",
            Self::HighMaintenanceDiva => "high_maintenance_diva",
            Self::ChillFriend => "chill_friend",
            Self::IndependentSurvivor => "independent_survivor",
        }
    }

    /// Archetype for an open-catalog plant from its category and climate.
    ///
    /// Category keys are tested in declaration order and the first key
    /// contained in the category wins, so "Cactus And Succulent" resolves
    /// before the plainer "cactus". Climate is only consulted when no
    /// category key matches.
    pub fn from_category(category: &str, climate: &str) -> Self {
        let category = category.to_lowercase();
        if let Some((_, archetype)) = CATEGORY_ARCHETYPES
            .iter()
            .find(|(key, _)| category.contains(key))
        {
            return *archetype;
        }

        let climate = climate.to_lowercase();
        if climate.contains("desert") || climate.contains("arid") {
            Self::SarcasticSurvivor
        } else if climate.contains("tropical humid") {
            Self::DramaticDiva
        } else if climate.contains("tropical") {
            Self::ChillFriend
        } else {
            Self::default()
        }
    }
}

/// Ordered category-substring table for [`PersonalityArchetype::from_category`].
const CATEGORY_ARCHETYPES: &[(&str, PersonalityArchetype)] = &[
    // Drought-tolerant survivors
    ("cactus and succulent", PersonalityArchetype::SarcasticSurvivor),
    ("succulent", PersonalityArchetype::SarcasticSurvivor),
    ("cactus", PersonalityArchetype::SarcasticSurvivor),
    ("dracaena", PersonalityArchetype::SteadyReliable),
    // High-maintenance
    ("fern", PersonalityArchetype::DramaticCommunicator),
    ("bromeliad", PersonalityArchetype::DramaticDiva),
    ("orchid", PersonalityArchetype::HighMaintenanceDiva),
    // Easy-going
    ("foliage plant", PersonalityArchetype::ChillFriend),
    ("hanging", PersonalityArchetype::ChillFriend),
    ("vine", PersonalityArchetype::ChillFriend),
    ("climbing", PersonalityArchetype::ChillFriend),
    // Steady
    ("tree", PersonalityArchetype::SteadyReliable),
    ("palm", PersonalityArchetype::SteadyReliable),
    ("shrub", PersonalityArchetype::SteadyReliable),
    // Independent
    ("air plant", PersonalityArchetype::IndependentSurvivor),
    ("epiphyte", PersonalityArchetype::IndependentSurvivor),
];

impl fmt::Display for PersonalityArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityArchetype {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| ParseEnumError {
                kind: "personality archetype",
                value: s.to_owned(),
            })
    }
}
