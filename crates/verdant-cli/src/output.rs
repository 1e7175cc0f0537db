//! Shared printing helpers for command output.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

/// Calendar date of an instant, as shown in tables.
pub fn date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

/// `"none"` for an empty list, else the items joined by `", "`.
pub fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn date_drops_time_of_day() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(date(at), "2026-03-09");
    }

    #[test]
    fn list_or_none_handles_empty() {
        assert_eq!(list_or_none(&[]), "none");
        assert_eq!(
            list_or_none(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }
}
