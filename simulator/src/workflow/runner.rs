use crate::workflow::config::WorkflowConfig;
use roadcore::filter::query::QueryBuilder;
use roadcore::filter::state::FilterState;
use roadcore::incident::IncidentRecord;

/// Result of one offline filter pass.
pub struct FilterSummary {
    pub matched: Vec<IncidentRecord>,
    pub total: usize,
    /// Counts per severity level 1..=5 within the matched set.
    pub severity_histogram: [usize; 5],
    /// Canonical query string the live dashboard would send for this state.
    pub query_string: String,
}

/// Applies the query endpoint's filter semantics to a local dataset, so
/// fixture sets and scenario configs can be checked without a server.
#[derive(Clone)]
pub struct Runner {
    state: FilterState,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            state: config.to_filter_state(),
        }
    }

    /// Endpoint semantics: an empty severity set matches every level, date
    /// bounds are inclusive, and confidence must meet the floor.
    fn matches(&self, record: &IncidentRecord) -> bool {
        if !self.state.severities.is_empty() && !self.state.severities.contains(&record.severity) {
            return false;
        }
        if let Some(start) = self.state.start_date {
            if record.date < start {
                return false;
            }
        }
        if let Some(end) = self.state.end_date {
            if record.date > end {
                return false;
            }
        }
        record.confidence >= self.state.confidence_min
    }

    pub fn execute(&self, records: &[IncidentRecord]) -> FilterSummary {
        let matched: Vec<IncidentRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        let mut severity_histogram = [0usize; 5];
        for record in &matched {
            if (1..=5).contains(&record.severity) {
                severity_histogram[record.severity as usize - 1] += 1;
            }
        }

        FilterSummary {
            total: records.len(),
            severity_histogram,
            query_string: QueryBuilder::build(&self.state).query_string(),
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, severity: u8, confidence: f64, day: u32) -> IncidentRecord {
        IncidentRecord::new(
            id,
            39.95,
            -75.16,
            severity,
            confidence,
            NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
        )
    }

    fn dataset() -> Vec<IncidentRecord> {
        vec![
            record(1, 1, 0.50, 1),
            record(2, 3, 0.80, 10),
            record(3, 5, 0.95, 20),
            record(4, 3, 0.40, 25),
        ]
    }

    #[test]
    fn empty_scenario_matches_everything() {
        let runner = Runner::new(WorkflowConfig::default());
        let summary = runner.execute(&dataset());
        assert_eq!(summary.matched.len(), 4);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.query_string, "conf_min=0.00");
    }

    #[test]
    fn severity_and_confidence_floors_apply() {
        let config = WorkflowConfig {
            severities: vec![3],
            conf_min: 0.6,
            ..Default::default()
        };
        let summary = Runner::new(config).execute(&dataset());
        assert_eq!(summary.matched.len(), 1);
        assert_eq!(summary.matched[0].id, 2);
        assert_eq!(summary.severity_histogram, [0, 0, 1, 0, 0]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let config = WorkflowConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 20),
            ..Default::default()
        };
        let summary = Runner::new(config).execute(&dataset());
        let ids: Vec<u64> = summary.matched.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        // Forwarded as-is; an inverted window simply yields an empty set.
        let config = WorkflowConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 20),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 10),
            ..Default::default()
        };
        let summary = Runner::new(config).execute(&dataset());
        assert!(summary.matched.is_empty());
    }
}
