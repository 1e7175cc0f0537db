//! Archetype-specific reminder templates.
//!
//! Templates carry `{plant_name}` and `{days}` placeholders. Selection is
//! deterministic: the first template declared for an (archetype, message
//! type) pair is always used.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::PersonalityArchetype;
use crate::care::{CareType, ParseEnumError};

/// Template used when an archetype has nothing for a message type.
pub const NEUTRAL_TEMPLATE: &str = "Time to take care of {plant_name}!";

/// Kinds of message a reminder can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    WateringReminder,
    FertilizingReminder,
}

impl MessageType {
    /// Message type used for reminders of `care_type`. Repotting is
    /// informational and has no reminder text.
    pub fn for_care(care_type: CareType) -> Option<Self> {
        match care_type {
            CareType::Watering => Some(Self::WateringReminder),
            CareType::Fertilizing => Some(Self::FertilizingReminder),
            CareType::Repotting => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WateringReminder => "watering_reminder",
            Self::FertilizingReminder => "fertilizing_reminder",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "watering_reminder" => Ok(Self::WateringReminder),
            "fertilizing_reminder" => Ok(Self::FertilizingReminder),
            other => Err(ParseEnumError {
                kind: "message type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Substitute `{plant_name}` and `{days}` in a template.
pub fn render_template(template: &str, plant_name: &str, days: i64) -> String {
    template
        .replace("{days}", &days.to_string())
        .replace("{plant_name}", plant_name)
}

/// Lookup table of reminder templates keyed by archetype and message type.
#[derive(Debug, Clone, Default)]
pub struct MessageTemplates {
    by_key: HashMap<(PersonalityArchetype, MessageType), Vec<String>>,
}

impl MessageTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append templates for a pair. Empty strings are ignored.
    pub fn insert(
        &mut self,
        archetype: PersonalityArchetype,
        message_type: MessageType,
        templates: impl IntoIterator<Item = String>,
    ) {
        let entry = self.by_key.entry((archetype, message_type)).or_default();
        entry.extend(templates.into_iter().filter(|t| !t.trim().is_empty()));
    }

    /// The template that will be used for a pair, if one is declared.
    pub fn template(
        &self,
        archetype: PersonalityArchetype,
        message_type: MessageType,
    ) -> Option<&str> {
        self.by_key
            .get(&(archetype, message_type))
            .and_then(|list| list.first())
            .map(String::as_str)
    }

    /// Render a reminder, falling back to [`NEUTRAL_TEMPLATE`].
    pub fn render(
        &self,
        message_type: MessageType,
        archetype: PersonalityArchetype,
        plant_name: &str,
        days: i64,
    ) -> String {
        let template = self
            .template(archetype, message_type)
            .unwrap_or(NEUTRAL_TEMPLATE);
        render_template(template, plant_name, days)
    }

    /// Number of (archetype, message type) pairs with at least one template.
    pub fn len(&self) -> usize {
        self.by_key.values().filter(|v| !v.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
