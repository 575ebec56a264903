//! Laytime parameter, judgment, and result models.

use serde::{Deserialize, Serialize};

use super::{Currency, PortEvent};

/// A judgment over one port event: does its duration count toward laytime?
///
/// Produced by the extraction gateway as part of the laytime breakdown;
/// display-only in this service (totals are supplied, not re-derived).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaytimeEventEntry {
    pub event: String,
    pub duration: String,
    #[serde(rename = "isCounted")]
    pub is_counted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The gateway's laytime judgment: human-readable totals plus a per-event
/// counted/not-counted breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaytimeBreakdown {
    #[serde(rename = "totalLaytime")]
    pub total_laytime: String,
    #[serde(rename = "allowedLaytime")]
    pub allowed_laytime: String,
    #[serde(rename = "timeSaved")]
    pub time_saved: String,
    pub demurrage: String,
    #[serde(rename = "laytimeEvents", default)]
    pub laytime_events: Vec<LaytimeEventEntry>,
}

/// User-editable contract parameters driving the laytime engine.
///
/// Seeded from the extraction response, freely overridable afterwards; the
/// engine recomputes from scratch on every change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaytimeParameters {
    pub allowed_laytime_days: f64,
    pub demurrage_rate_per_day: f64,
    pub rate_currency: Currency,
    pub display_currency: Currency,
}

impl Default for LaytimeParameters {
    fn default() -> Self {
        Self {
            allowed_laytime_days: 3.0,
            demurrage_rate_per_day: 20_000.0,
            rate_currency: Currency::Usd,
            display_currency: Currency::Usd,
        }
    }
}

impl LaytimeParameters {
    /// Clamp negative numeric inputs to zero before they reach the engine.
    pub fn sanitized(self) -> Self {
        Self {
            allowed_laytime_days: self.allowed_laytime_days.max(0.0),
            demurrage_rate_per_day: self.demurrage_rate_per_day.max(0.0),
            ..self
        }
    }
}

/// Derived laytime figures, recomputed on demand and never mutated in place.
///
/// At most one of `time_saved_hours` / `demurrage_hours` is nonzero;
/// `demurrage_cost` is zero iff `demurrage_hours` is zero (or the rate is).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaytimeOutcome {
    pub time_saved_hours: f64,
    pub demurrage_hours: f64,
    pub demurrage_cost: f64,
    pub display_currency: Currency,
    pub time_saved_display: String,
    pub demurrage_display: String,
}

/// The full extracted-and-computed record for one SoF document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(rename = "vesselName")]
    pub vessel_name: String,
    pub events: Vec<PortEvent>,
    #[serde(rename = "laytimeCalculation", skip_serializing_if = "Option::is_none")]
    pub laytime: Option<LaytimeBreakdown>,
    #[serde(rename = "eventsSummary", skip_serializing_if = "Option::is_none")]
    pub events_summary: Option<String>,
}

impl ExtractionRecord {
    /// File name for the JSON export, derived from the vessel name with
    /// whitespace collapsed to underscores.
    pub fn export_file_name(&self) -> String {
        let vessel: Vec<&str> = self.vessel_name.split_whitespace().collect();
        let stem = if vessel.is_empty() {
            "vessel".to_string()
        } else {
            vessel.join("_")
        };
        format!("{}_sof_events.json", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_default() {
        let params = LaytimeParameters::default();
        assert_eq!(params.allowed_laytime_days, 3.0);
        assert_eq!(params.demurrage_rate_per_day, 20_000.0);
        assert_eq!(params.rate_currency, Currency::Usd);
        assert_eq!(params.display_currency, Currency::Usd);
    }

    #[test]
    fn test_parameters_sanitized() {
        let params = LaytimeParameters {
            allowed_laytime_days: -1.0,
            demurrage_rate_per_day: -500.0,
            rate_currency: Currency::Eur,
            display_currency: Currency::Gbp,
        }
        .sanitized();

        assert_eq!(params.allowed_laytime_days, 0.0);
        assert_eq!(params.demurrage_rate_per_day, 0.0);
        assert_eq!(params.rate_currency, Currency::Eur);
    }

    #[test]
    fn test_breakdown_deserialization() {
        let json = r#"{
            "totalLaytime": "2 days, 4 hours, 30 minutes",
            "allowedLaytime": "3 days",
            "timeSaved": "19 hours, 30 minutes",
            "demurrage": "0h 0m",
            "laytimeEvents": [
                {"event": "Cargo Loading", "duration": "1d 4h", "isCounted": true, "reason": "Standard operation"},
                {"event": "Heavy Rain", "duration": "6h", "isCounted": false, "reason": "Weather interruption"}
            ]
        }"#;

        let breakdown: LaytimeBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(breakdown.total_laytime, "2 days, 4 hours, 30 minutes");
        assert_eq!(breakdown.laytime_events.len(), 2);
        assert!(breakdown.laytime_events[0].is_counted);
        assert!(!breakdown.laytime_events[1].is_counted);
    }

    #[test]
    fn test_export_file_name() {
        let record = ExtractionRecord {
            vessel_name: "MV Ocean Star".to_string(),
            events: vec![],
            laytime: None,
            events_summary: None,
        };
        assert_eq!(record.export_file_name(), "MV_Ocean_Star_sof_events.json");
    }

    #[test]
    fn test_export_file_name_blank_vessel() {
        let record = ExtractionRecord {
            vessel_name: "   ".to_string(),
            events: vec![],
            laytime: None,
            events_summary: None,
        };
        assert_eq!(record.export_file_name(), "vessel_sof_events.json");
    }

    #[test]
    fn test_record_serialization_skips_absent_fields() {
        let record = ExtractionRecord {
            vessel_name: "MV Test".to_string(),
            events: vec![],
            laytime: None,
            events_summary: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"vesselName\""));
        assert!(!json.contains("laytimeCalculation"));
        assert!(!json.contains("eventsSummary"));
    }
}
