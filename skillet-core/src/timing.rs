//! Duration formatting and wire representation.
//!
//! Recipe timings travel as plain seconds in the curated feed and display as
//! whole minutes in the UI. This module holds both conversions.

use std::time::Duration;

/// Format an optional duration as whole minutes, e.g. "15 min".
///
/// Unset durations display as "0 min", matching the recipe detail screens.
pub fn format_minutes(duration: Option<Duration>) -> String {
    let minutes = duration.map(|d| d.as_secs() / 60).unwrap_or(0);
    format!("{} min", minutes)
}

/// Format a step's time estimate, or `None` if the step has no estimate.
///
/// Sub-minute estimates display as "< 1 min" rather than "0 min".
pub fn format_estimate(duration: Option<Duration>) -> Option<String> {
    let duration = duration?;
    let minutes = duration.as_secs() / 60;
    if minutes > 0 {
        Some(format!("{} min", minutes))
    } else {
        Some("< 1 min".to_string())
    }
}

/// Format a quantity with up to two decimal places, trimming trailing zeros.
///
/// "1.50" displays as "1.5", "2.00" as "2".
pub fn format_quantity(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}

/// Serde representation for `Option<Duration>` as f64 seconds.
///
/// The curated feed and the persistence boundary both carry durations as
/// plain JSON numbers of seconds. Negative and non-finite values are decode
/// errors rather than panics.
pub mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(|d| d.as_secs_f64()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        match secs {
            None => Ok(None),
            Some(s) if s.is_finite() && s >= 0.0 => Ok(Some(Duration::from_secs_f64(s))),
            Some(s) => Err(serde::de::Error::custom(format!(
                "duration must be a non-negative number of seconds, got {}",
                s
            ))),
        }
    }
}
