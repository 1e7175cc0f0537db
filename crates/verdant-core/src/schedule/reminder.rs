use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::care::{CareType, ParseEnumError};
use crate::personality::PersonalityArchetype;

/// How overdue a care obligation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseEnumError::new("urgency", s)),
        }
    }
}

/// Urgency for an obligation that is `days_overdue` whole days late.
///
/// Watering: 0 low, 1-2 medium, 3-5 high, more critical.
/// Fertilizing: up to 7 low, up to 30 medium, more high.
/// Repotting is informational and always low.
pub fn classify_urgency(care_type: CareType, days_overdue: i64) -> Urgency {
    match care_type {
        CareType::Watering => match days_overdue {
            i64::MIN..=0 => Urgency::Low,
            1..=2 => Urgency::Medium,
            3..=5 => Urgency::High,
            _ => Urgency::Critical,
        },
        CareType::Fertilizing => match days_overdue {
            i64::MIN..=7 => Urgency::Low,
            8..=30 => Urgency::Medium,
            _ => Urgency::High,
        },
        CareType::Repotting => Urgency::Low,
    }
}

/// A rendered reminder for one overdue obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareReminder {
    pub plant_id: String,
    pub plant_name: String,
    pub care_type: CareType,
    /// When the obligation fell due. Never after the generation instant.
    pub due_date: DateTime<Utc>,
    pub days_overdue: i64,
    pub message: String,
    pub urgency: Urgency,
    pub personality: PersonalityArchetype,
}

impl CareReminder {
    /// Whether the reminder is worth an outbound message (medium or higher).
    pub fn warrants_message(&self) -> bool {
        self.urgency >= Urgency::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watering_thresholds() {
        let cases = [
            (0, Urgency::Low),
            (1, Urgency::Medium),
            (2, Urgency::Medium),
            (3, Urgency::High),
            (5, Urgency::High),
            (6, Urgency::Critical),
            (40, Urgency::Critical),
        ];
        for (days, expected) in cases {
            assert_eq!(
                classify_urgency(CareType::Watering, days),
                expected,
                "{days} days overdue"
            );
        }
    }

    #[test]
    fn fertilizing_thresholds() {
        assert_eq!(classify_urgency(CareType::Fertilizing, 0), Urgency::Low);
        assert_eq!(classify_urgency(CareType::Fertilizing, 7), Urgency::Low);
        assert_eq!(classify_urgency(CareType::Fertilizing, 8), Urgency::Medium);
        assert_eq!(classify_urgency(CareType::Fertilizing, 30), Urgency::Medium);
        assert_eq!(classify_urgency(CareType::Fertilizing, 31), Urgency::High);
    }

    #[test]
    fn repotting_is_never_urgent() {
        assert_eq!(classify_urgency(CareType::Repotting, 500), Urgency::Low);
    }

    #[test]
    fn urgency_orders_by_severity() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::High < Urgency::Critical);
        assert_eq!("CRITICAL".parse::<Urgency>().unwrap(), Urgency::Critical);
        assert!("urgent".parse::<Urgency>().is_err());
    }
}
