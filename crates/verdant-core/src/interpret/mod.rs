//! Inbound text messages to (plant, care action) pairs.
//!
//! [`TextCareInterpreter::detect_action`] finds the care keyword and
//! [`TextCareInterpreter::resolve_plant`] works out which of the sender's
//! plants the message is about. Neither ever fails: an unclear message
//! produces [`PlantResolution::Ambiguous`] or no action, and the caller
//! decides how to follow up.

pub mod phone;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::care::CareActionType;
use crate::knowledge::PlantKnowledgeBase;
use crate::schedule::PlantSnapshot;

/// Verbs tested first.
const PRIMARY_KEYWORDS: &[(&str, CareActionType)] = &[
    ("watered", CareActionType::Watering),
    ("fertilized", CareActionType::Fertilizing),
    ("repotted", CareActionType::Repotting),
    ("misted", CareActionType::Misting),
    ("pruned", CareActionType::Pruning),
];

/// Synonyms tested when no primary verb is present.
const SECONDARY_KEYWORDS: &[(&str, CareActionType)] = &[
    ("water", CareActionType::Watering),
    ("fed", CareActionType::Fertilizing),
    ("feed", CareActionType::Fertilizing),
    ("repot", CareActionType::Repotting),
    ("mist", CareActionType::Misting),
    ("spray", CareActionType::Misting),
    ("trim", CareActionType::Pruning),
    ("cut", CareActionType::Pruning),
];

/// Shortest token the fuzzy tier will compare.
pub const MIN_TOKEN_LEN: usize = 3;

/// A plant a message may refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantIdentity {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub species: Option<String>,
}

impl PlantIdentity {
    pub fn new(id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
            species: None,
        }
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }
}

impl From<&PlantSnapshot> for PlantIdentity {
    fn from(snapshot: &PlantSnapshot) -> Self {
        Self {
            id: snapshot.id.clone(),
            nickname: snapshot.display_name().to_owned(),
            species: snapshot.species.clone(),
        }
    }
}

/// Which plant a message is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlantResolution {
    Resolved { plant: PlantIdentity },
    /// More than one plant fits; the caller should ask which.
    Ambiguous { candidates: Vec<PlantIdentity> },
    /// The collection is empty.
    NotFound,
}

/// Result of interpreting one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CareInterpretation {
    /// The sender has no plants.
    NoPlants,
    /// No care keyword in the message.
    NoActionDetected,
    /// An action was found but not its plant.
    PlantNotIdentified {
        action: CareActionType,
        candidates: Vec<PlantIdentity>,
    },
    Recognized {
        plant: PlantIdentity,
        action: CareActionType,
    },
}

/// Maps free-text care messages to actions and plants.
#[derive(Debug, Clone)]
pub struct TextCareInterpreter {
    knowledge: Arc<PlantKnowledgeBase>,
}

impl TextCareInterpreter {
    pub fn new(knowledge: Arc<PlantKnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// The care action a message reports, if any.
    pub fn detect_action(&self, message: &str) -> Option<CareActionType> {
        let text = message.to_lowercase();
        PRIMARY_KEYWORDS
            .iter()
            .chain(SECONDARY_KEYWORDS)
            .find(|(keyword, _)| text.contains(keyword))
            .map(|&(keyword, action)| {
                debug!(keyword, %action, "care action detected");
                action
            })
    }

    /// Resolve which of `candidates` a message is about.
    ///
    /// Tiers, first hit wins: nickname contained in the message, species or
    /// known common name contained in the message, then any message token
    /// overlapping a nickname token. When several plants hit the same tier
    /// and one hit's name is contained in another's ("Fern" and "Fernando"),
    /// the longer name wins. A single-plant collection always resolves.
    pub fn resolve_plant(&self, message: &str, candidates: &[PlantIdentity]) -> PlantResolution {
        match candidates {
            [] => return PlantResolution::NotFound,
            [only] => {
                return PlantResolution::Resolved {
                    plant: only.clone(),
                };
            }
            _ => {}
        }

        let text = message.to_lowercase();

        let by_nickname = hits(candidates, |plant| {
            let nickname = plant.nickname.trim().to_lowercase();
            (!nickname.is_empty() && text.contains(&nickname)).then_some(nickname)
        });
        if let Some(resolution) = settle("nickname", &text, by_nickname) {
            return resolution;
        }

        let by_species = hits(candidates, |plant| {
            self.species_names(plant)
                .into_iter()
                .filter(|name| text.contains(name.as_str()))
                .max_by_key(String::len)
        });
        if let Some(resolution) = settle("species", &text, by_species) {
            return resolution;
        }

        let message_tokens = tokens(&text);
        let by_token = hits(candidates, |plant| {
            let nickname = plant.nickname.to_lowercase();
            let overlaps = tokens(&nickname).iter().any(|nick| {
                message_tokens
                    .iter()
                    .any(|word| word.contains(nick.as_str()) || nick.contains(word.as_str()))
            });
            overlaps.then_some(nickname)
        });
        if let Some(resolution) = settle("token", &text, by_token) {
            return resolution;
        }

        debug!(candidates = candidates.len(), "no plant named in message");
        PlantResolution::Ambiguous {
            candidates: candidates.to_vec(),
        }
    }

    /// Detect the action, then the plant, the way an inbound-message handler
    /// needs them.
    pub fn interpret(&self, message: &str, candidates: &[PlantIdentity]) -> CareInterpretation {
        if candidates.is_empty() {
            return CareInterpretation::NoPlants;
        }
        let Some(action) = self.detect_action(message) else {
            return CareInterpretation::NoActionDetected;
        };
        match self.resolve_plant(message, candidates) {
            PlantResolution::Resolved { plant } => CareInterpretation::Recognized { plant, action },
            PlantResolution::Ambiguous { candidates } => {
                CareInterpretation::PlantNotIdentified { action, candidates }
            }
            PlantResolution::NotFound => CareInterpretation::NoPlants,
        }
    }

    /// Lower-cased species name plus every common name the knowledge base
    /// knows for it.
    fn species_names(&self, plant: &PlantIdentity) -> Vec<String> {
        let Some(species) = plant.species.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return Vec::new();
        };
        let mut names = vec![species.to_lowercase()];
        if let Some(profile) = self.knowledge.lookup(species) {
            names.extend(
                profile
                    .common_names
                    .iter()
                    .map(|n| n.trim().to_lowercase())
                    .filter(|n| !n.is_empty()),
            );
        }
        names
    }
}

/// Whitespace tokens with surrounding punctuation removed, at least
/// [`MIN_TOKEN_LEN`] characters long.
fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

/// Candidates for which `matcher` produced a matched name.
fn hits<'a, F>(candidates: &'a [PlantIdentity], matcher: F) -> Vec<(&'a PlantIdentity, String)>
where
    F: Fn(&PlantIdentity) -> Option<String>,
{
    candidates
        .iter()
        .filter_map(|plant| matcher(plant).map(|name| (plant, name)))
        .collect()
}

/// Turn one tier's hits into a resolution, or `None` to try the next tier.
fn settle(
    tier: &str,
    text: &str,
    hits: Vec<(&PlantIdentity, String)>,
) -> Option<PlantResolution> {
    // Drop a hit only when the message never names it outside a longer hit.
    let kept: Vec<&PlantIdentity> = hits
        .iter()
        .filter(|(_, name)| !hits.iter().any(|(_, other)| shadows(other, name, text)))
        .map(|(plant, _)| *plant)
        .collect();

    match kept.as_slice() {
        [] => None,
        [plant] => {
            debug!(tier, plant_id = %plant.id, "plant resolved");
            Some(PlantResolution::Resolved {
                plant: (*plant).clone(),
            })
        }
        _ => {
            debug!(tier, matches = kept.len(), "ambiguous plant reference");
            Some(PlantResolution::Ambiguous {
                candidates: kept.iter().map(|plant| (*plant).clone()).collect(),
            })
        }
    }
}

/// True when `longer` contains `name` and every occurrence of `name` in
/// `text` sits inside an occurrence of `longer`.
fn shadows(longer: &str, name: &str, text: &str) -> bool {
    if longer.len() <= name.len() || !longer.contains(name) {
        return false;
    }
    let spans: Vec<(usize, usize)> = text
        .match_indices(longer)
        .map(|(start, m)| (start, start + m.len()))
        .collect();
    text.match_indices(name).all(|(start, m)| {
        let end = start + m.len();
        spans.iter().any(|&(lo, hi)| lo <= start && end <= hi)
    })
}
