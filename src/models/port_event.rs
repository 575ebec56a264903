//! Port operation event model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculate::parse_duration_hours;

/// Timestamp format used throughout SoF documents and the extraction
/// gateway contract.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One observed operational occurrence during a port call.
///
/// Created once per extraction response and immutable thereafter. The
/// category set is open: the gateway usually emits Arrival, Cargo Operations,
/// Delays, Departure or Bunkering, but unrecognized categories are preserved
/// verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortEvent {
    /// Short human label, e.g. "Pilot Onboard"
    #[serde(rename = "event")]
    pub title: String,

    /// Event category (open string enumeration)
    pub category: String,

    /// Start timestamp, "YYYY-MM-DD HH:MM"
    #[serde(rename = "startTime")]
    pub start_time: String,

    /// End timestamp, "YYYY-MM-DD HH:MM"
    #[serde(rename = "endTime")]
    pub end_time: String,

    /// Human-readable duration as supplied by the gateway, e.g. "2h 30m"
    pub duration: String,

    /// Free-text status, e.g. "Completed", "Delayed"
    #[serde(default)]
    pub status: String,

    /// Additional notes from the SoF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl PortEvent {
    /// Parse a gateway timestamp. None for anything that doesn't match the
    /// expected format.
    pub fn parse_time(value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), EVENT_TIME_FORMAT).ok()
    }

    /// Duration of this event in hours.
    ///
    /// Derived from the timestamps when both parse; the gateway is expected
    /// to uphold end >= start but is not guaranteed to, so negative spans
    /// clamp to zero. Falls back to the supplied duration string when the
    /// timestamps are unusable.
    pub fn duration_hours(&self) -> f64 {
        match (
            Self::parse_time(&self.start_time),
            Self::parse_time(&self.end_time),
        ) {
            (Some(start), Some(end)) => {
                let minutes = (end - start).num_minutes();
                if minutes <= 0 {
                    0.0
                } else {
                    minutes as f64 / 60.0
                }
            }
            _ => parse_duration_hours(&self.duration),
        }
    }
}
