//! Closed vocabularies shared by the scheduler and the interpreter.
//!
//! Every enum here has a stable snake_case string form (used in data files,
//! CLI flags and JSON output) and an exhaustive `FromStr`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Error returned when parsing one of the care enums from an unknown string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Which vocabulary was being parsed (e.g. `season`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// Which half of the globe the plants live in. Decides the month-to-season
/// mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Northern => "northern",
            Self::Southern => "southern",
        })
    }
}

impl FromStr for Hemisphere {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "northern" | "north" => Ok(Self::Northern),
            "southern" | "south" => Ok(Self::Southern),
            _ => Err(ParseEnumError::new("hemisphere", s)),
        }
    }
}

/// Meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// All seasons in calendar order starting with spring.
    pub const ALL: [Season; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Season for a calendar month (1-12).
    ///
    /// Northern hemisphere: Mar-May spring, Jun-Aug summer, Sep-Nov fall,
    /// Dec-Feb winter. The southern hemisphere is shifted by two seasons.
    /// Out-of-range months are treated as winter months.
    pub fn from_month(month: u32, hemisphere: Hemisphere) -> Self {
        let northern = match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        };
        match hemisphere {
            Hemisphere::Northern => northern,
            Hemisphere::Southern => northern.opposite(),
        }
    }

    /// Season in effect at `instant` (UTC calendar month).
    pub fn at(instant: DateTime<Utc>, hemisphere: Hemisphere) -> Self {
        Self::from_month(instant.month(), hemisphere)
    }

    /// The season on the other side of the year.
    pub fn opposite(self) -> Self {
        match self {
            Self::Spring => Self::Fall,
            Self::Summer => Self::Winter,
            Self::Fall => Self::Spring,
            Self::Winter => Self::Summer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" | "autumn" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(ParseEnumError::new("season", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// GrowthStage
// ---------------------------------------------------------------------------

/// How long a plant has been in its owner's care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Fewer than 28 days in care.
    NewPlant,
    /// Fewer than 365 days in care.
    Established,
    Mature,
}

impl GrowthStage {
    /// Days in care below which a plant counts as new.
    pub const NEW_PLANT_DAYS: i64 = 28;
    /// Days in care below which a plant counts as established.
    pub const ESTABLISHED_DAYS: i64 = 365;

    /// Stage for a plant that has been in care for `days` whole days.
    /// Negative values (care start in the future) count as new.
    pub fn from_days_in_care(days: i64) -> Self {
        if days < Self::NEW_PLANT_DAYS {
            Self::NewPlant
        } else if days < Self::ESTABLISHED_DAYS {
            Self::Established
        } else {
            Self::Mature
        }
    }

    /// Stage at `now` for a plant that entered care at `entered_care_at`.
    ///
    /// Counts UTC calendar days, not elapsed 24-hour periods: 27 days 23
    /// hours that span 28 date boundaries is already `Established`. The
    /// stage therefore holds for a whole UTC day.
    pub fn at(entered_care_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_days_in_care((now.date_naive() - entered_care_at.date_naive()).num_days())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewPlant => "new_plant",
            Self::Established => "established",
            Self::Mature => "mature",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrowthStage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new_plant" | "new" => Ok(Self::NewPlant),
            "established" => Ok(Self::Established),
            "mature" => Ok(Self::Mature),
            _ => Err(ParseEnumError::new("growth stage", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// Care kinds
// ---------------------------------------------------------------------------

/// A scheduled care obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareType {
    Watering,
    Fertilizing,
    Repotting,
}

impl fmt::Display for CareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Repotting => "repotting",
        })
    }
}

/// A care action a person reports having done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareActionType {
    Watering,
    Fertilizing,
    Repotting,
    Misting,
    Pruning,
}

impl CareActionType {
    /// The scheduled obligation this action satisfies, if any. Misting and
    /// pruning are recorded but do not move a schedule.
    pub fn care_type(self) -> Option<CareType> {
        match self {
            Self::Watering => Some(CareType::Watering),
            Self::Fertilizing => Some(CareType::Fertilizing),
            Self::Repotting => Some(CareType::Repotting),
            Self::Misting | Self::Pruning => None,
        }
    }
}

impl fmt::Display for CareActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::Repotting => "repotting",
            Self::Misting => "misting",
            Self::Pruning => "pruning",
        })
    }
}

impl FromStr for CareActionType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "watering" => Ok(Self::Watering),
            "fertilizing" => Ok(Self::Fertilizing),
            "repotting" => Ok(Self::Repotting),
            "misting" => Ok(Self::Misting),
            "pruning" => Ok(Self::Pruning),
            _ => Err(ParseEnumError::new("care action", s)),
        }
    }
}
