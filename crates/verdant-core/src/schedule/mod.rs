//! Care schedules and reminders for plant collections.
//!
//! [`CareScheduleEngine`] combines a shared [`PlantKnowledgeBase`] with the
//! season and growth stage in effect "now" to produce a [`CareSchedule`] per
//! plant, and turns overdue schedule entries into ranked [`CareReminder`]s.
//! Every operation is a pure function of its inputs, the knowledge base and
//! the clock, so one engine can serve any number of threads.

pub mod clock;
pub mod reminder;

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::care::{CareType, GrowthStage, Hemisphere, Season};
use crate::knowledge::{PlantKnowledgeBase, Provenance, SeasonalCalendarEntry};
use crate::personality::{MessageType, PersonalityArchetype};

pub use clock::{Clock, SystemClock};
pub use reminder::{CareReminder, Urgency, classify_urgency};

/// Name used for plants with neither nickname nor species.
pub const FALLBACK_PLANT_NAME: &str = "Your plant";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub hemisphere: Hemisphere,
    /// Days until the first fertilizing of a plant that was never fertilized.
    pub fertilizing_grace_days: u32,
    /// Care tips copied into each schedule.
    pub max_care_tips: usize,
    /// Assumed age of the last watering when a snapshot has none.
    pub default_days_since_watering: u32,
    /// Assumed time in care when a snapshot has no care start.
    pub default_days_in_care: u32,
}

impl EngineConfig {
    pub const DEFAULT_FERTILIZING_GRACE_DAYS: u32 = 14;
    pub const DEFAULT_MAX_CARE_TIPS: usize = 3;

    pub fn hemisphere(mut self, hemisphere: Hemisphere) -> Self {
        self.hemisphere = hemisphere;
        self
    }

    pub fn fertilizing_grace_days(mut self, days: u32) -> Self {
        self.fertilizing_grace_days = days;
        self
    }

    pub fn max_care_tips(mut self, max: usize) -> Self {
        self.max_care_tips = max;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hemisphere: Hemisphere::Northern,
            fertilizing_grace_days: Self::DEFAULT_FERTILIZING_GRACE_DAYS,
            max_care_tips: Self::DEFAULT_MAX_CARE_TIPS,
            default_days_since_watering: 7,
            default_days_in_care: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// One plant as supplied by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Species or common name as the owner entered it.
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entered_care_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl PlantSnapshot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn last_watered(mut self, at: DateTime<Utc>) -> Self {
        self.last_watered = Some(at);
        self
    }

    pub fn entered_care_at(mut self, at: DateTime<Utc>) -> Self {
        self.entered_care_at = Some(at);
        self
    }

    pub fn last_fertilized(mut self, at: DateTime<Utc>) -> Self {
        self.last_fertilized = Some(at);
        self
    }

    /// Nickname, else species, else [`FALLBACK_PLANT_NAME`].
    pub fn display_name(&self) -> &str {
        [self.nickname.as_deref(), self.species.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_PLANT_NAME)
    }
}

/// Next-due dates and context for one plant, as of one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareSchedule {
    pub plant_id: String,
    pub plant_name: String,
    /// Species the profile was resolved to (`unknown` for the default).
    pub species_id: String,
    pub provenance: Provenance,
    pub season: Season,
    pub growth_stage: GrowthStage,
    /// Interval after all multipliers; at least one day.
    pub watering_frequency_days: u32,
    pub next_watering: DateTime<Utc>,
    pub next_fertilizing: DateTime<Utc>,
    /// Informational only; never produces a reminder.
    pub next_repotting: DateTime<Utc>,
    pub personality: PersonalityArchetype,
    pub care_tips: Vec<String>,
}

impl CareSchedule {
    /// Due date for a care type.
    pub fn due(&self, care_type: CareType) -> DateTime<Utc> {
        match care_type {
            CareType::Watering => self.next_watering,
            CareType::Fertilizing => self.next_fertilizing,
            CareType::Repotting => self.next_repotting,
        }
    }
}

/// General care notes for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalCareTips {
    pub season: Season,
    pub general_notes: Option<String>,
    pub tasks: Vec<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Computes schedules and reminders from a shared knowledge base.
#[derive(Debug, Clone)]
pub struct CareScheduleEngine {
    knowledge: Arc<PlantKnowledgeBase>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// `instant` moved by `days`, clamped to the representable range.
fn shift_days(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

impl CareScheduleEngine {
    pub fn new(knowledge: Arc<PlantKnowledgeBase>) -> Self {
        Self {
            knowledge,
            config: EngineConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &PlantKnowledgeBase {
        &self.knowledge
    }

    /// The current instant according to the engine's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Season in effect now.
    pub fn current_season(&self) -> Season {
        Season::at(self.now(), self.config.hemisphere)
    }

    /// Schedule for one plant as of now.
    pub fn generate_schedule(&self, plant: &PlantSnapshot) -> CareSchedule {
        self.generate_schedule_at(plant, self.now())
    }

    /// Schedule for one plant as of `now`.
    ///
    /// Values derived from `now` alone (snapshot defaults, the fertilizing
    /// grace period) are anchored to the start of the UTC day, so any two
    /// calls on the same day with the same snapshot agree.
    pub fn generate_schedule_at(&self, plant: &PlantSnapshot, now: DateTime<Utc>) -> CareSchedule {
        let today = start_of_day(now);
        let last_watered = plant.last_watered.unwrap_or_else(|| {
            shift_days(today, -i64::from(self.config.default_days_since_watering))
        });
        let entered_care_at = plant.entered_care_at.unwrap_or_else(|| {
            shift_days(today, -i64::from(self.config.default_days_in_care))
        });

        let season = Season::at(now, self.config.hemisphere);
        let growth_stage = GrowthStage::at(entered_care_at, now);
        let profile = self.knowledge.resolve(plant.species.as_deref());

        let watering_frequency_days = profile.adjusted_watering_days(season, growth_stage);
        let next_watering = shift_days(last_watered, i64::from(watering_frequency_days));

        let next_fertilizing = match plant.last_fertilized {
            Some(at) => shift_days(at, i64::from(profile.fertilizing_frequency_days)),
            None => shift_days(today, i64::from(self.config.fertilizing_grace_days)),
        };

        let next_repotting = shift_days(
            entered_care_at,
            i64::from(profile.repotting_frequency_years) * 365,
        );

        debug!(
            plant_id = %plant.id,
            species_id = %profile.species_id,
            %season,
            %growth_stage,
            watering_frequency_days,
            "schedule generated"
        );

        CareSchedule {
            plant_id: plant.id.clone(),
            plant_name: plant.display_name().to_owned(),
            species_id: profile.species_id.clone(),
            provenance: profile.provenance,
            season,
            growth_stage,
            watering_frequency_days,
            next_watering,
            next_fertilizing,
            next_repotting,
            personality: profile.personality,
            care_tips: profile
                .care_tips
                .iter()
                .take(self.config.max_care_tips)
                .cloned()
                .collect(),
        }
    }

    /// Reminders for every overdue watering and fertilizing across `plants`,
    /// ascending by due date.
    pub fn due_reminders(&self, plants: &[PlantSnapshot]) -> Vec<CareReminder> {
        self.due_reminders_at(plants, self.now())
    }

    /// [`due_reminders`](Self::due_reminders) as of `now`.
    pub fn due_reminders_at(&self, plants: &[PlantSnapshot], now: DateTime<Utc>) -> Vec<CareReminder> {
        let mut reminders = Vec::new();
        for plant in plants {
            let schedule = self.generate_schedule_at(plant, now);
            for care_type in [CareType::Watering, CareType::Fertilizing] {
                if let Some(reminder) = self.reminder_for(&schedule, care_type, now) {
                    reminders.push(reminder);
                }
            }
        }
        // Stable sort keeps input order for equal due dates.
        reminders.sort_by_key(|r| r.due_date);
        reminders
    }

    /// Only the reminders that warrant an outbound message.
    pub fn notifiable_reminders(&self, plants: &[PlantSnapshot]) -> Vec<CareReminder> {
        self.notifiable_reminders_at(plants, self.now())
    }

    pub fn notifiable_reminders_at(
        &self,
        plants: &[PlantSnapshot],
        now: DateTime<Utc>,
    ) -> Vec<CareReminder> {
        self.due_reminders_at(plants, now)
            .into_iter()
            .filter(CareReminder::warrants_message)
            .collect()
    }

    fn reminder_for(
        &self,
        schedule: &CareSchedule,
        care_type: CareType,
        now: DateTime<Utc>,
    ) -> Option<CareReminder> {
        let message_type = MessageType::for_care(care_type)?;
        let due_date = schedule.due(care_type);
        if due_date > now {
            return None;
        }
        let days_overdue = (now - due_date).num_days();
        let message = self.knowledge.templates().render(
            message_type,
            schedule.personality,
            &schedule.plant_name,
            days_overdue,
        );
        Some(CareReminder {
            plant_id: schedule.plant_id.clone(),
            plant_name: schedule.plant_name.clone(),
            care_type,
            due_date,
            days_overdue,
            message,
            urgency: classify_urgency(care_type, days_overdue),
            personality: schedule.personality,
        })
    }

    /// Seasonal notes for `season`, or for the current season when `None`.
    /// A season without calendar data yields empty notes.
    pub fn seasonal_care_tips(&self, season: Option<Season>) -> SeasonalCareTips {
        let season = season.unwrap_or_else(|| self.current_season());
        let entry = self
            .knowledge
            .seasonal_calendar(season)
            .cloned()
            .unwrap_or_else(SeasonalCalendarEntry::default);
        SeasonalCareTips {
            season,
            general_notes: entry.general_notes,
            tasks: entry.tasks,
        }
    }
}
