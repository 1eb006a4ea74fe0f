use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reported road-surface defect as returned by the incident query
/// endpoint. Read-only to the core; the record set is replaced wholesale on
/// every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub id: u64,
    pub lat: f64,
    pub lng: f64,
    /// Severity 1 (minor) to 5 (critical).
    pub severity: u8,
    /// Detection-certainty score in [0, 1].
    pub confidence: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl IncidentRecord {
    pub fn new(id: u64, lat: f64, lng: f64, severity: u8, confidence: f64, date: NaiveDate) -> Self {
        Self {
            id,
            lat,
            lng,
            severity,
            confidence,
            date,
            description: None,
            image_url: None,
        }
    }
}
