use anyhow::Context;
use chrono::NaiveDate;
use roadcore::filter::state::FilterState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Filter scenario loaded from YAML, mirroring the dashboard's filter panel.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub severities: Vec<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub conf_min: f64,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Canonicalizes the scenario: duplicate or out-of-range severities are
    /// dropped and the confidence floor is clamped, same as the UI path.
    pub fn to_filter_state(&self) -> FilterState {
        let mut state = FilterState::new();
        for &level in &self.severities {
            state.toggle_severity(level, true);
        }
        state.start_date = self.start_date;
        state.end_date = self.end_date;
        state.set_confidence(self.conf_min);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_canonicalizes_into_filter_state() {
        let config = WorkflowConfig {
            severities: vec![4, 2, 4, 9],
            conf_min: 1.8,
            ..Default::default()
        };
        let state = config.to_filter_state();
        assert_eq!(state.severities.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(state.confidence_min, 1.0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"severities: [3, 5]\nstart_date: 2025-05-01\nconf_min: 0.6\n")
            .unwrap();
        let path = temp.into_temp_path();
        let config = WorkflowConfig::load(&path).unwrap();
        assert_eq!(config.severities, vec![3, 5]);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(config.conf_min, 0.6);
        assert!(config.end_date.is_none());
    }
}
