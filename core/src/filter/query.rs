use crate::filter::state::FilterState;
use chrono::NaiveDate;

/// Canonical, order-independent query form of a [`FilterState`].
///
/// Two states with the same effective severities, dates, and clamped
/// confidence serialize to byte-identical strings, so query strings can be
/// cached, compared in tests, and reused verbatim for export links.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    severities: Vec<u8>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    conf_min: f64,
}

impl Query {
    /// Ordered `(name, value)` pairs suitable for `reqwest`'s query encoder.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(self.severities.len() + 3);
        for level in &self.severities {
            pairs.push(("severity", level.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        pairs.push(("conf_min", format!("{:.2}", self.conf_min)));
        pairs
    }

    /// Canonical serialized form, e.g. `severity=1&severity=3&conf_min=0.40`.
    pub fn query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn confidence_floor(&self) -> f64 {
        self.conf_min
    }
}

/// Converts filter state into the canonical [`Query`].
pub struct QueryBuilder;

impl QueryBuilder {
    /// Pure: severities emitted in ascending order, dates omitted when
    /// unset, confidence floor always present (clamped, two decimals).
    pub fn build(state: &FilterState) -> Query {
        Query {
            severities: state.severities.iter().copied().collect(),
            start_date: state.start_date,
            end_date: state.end_date,
            // `+ 0.0` folds negative zero; "-0.00" must never reach the wire.
            conf_min: state.confidence_min.clamp(0.0, 1.0) + 0.0,
        }
    }
}
