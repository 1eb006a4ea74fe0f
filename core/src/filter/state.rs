use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Single source of truth for the current map view.
///
/// Severities are kept in a `BTreeSet` so uniqueness and ascending order
/// hold by construction regardless of the order checkboxes were toggled.
/// An inverted date range (`end_date < start_date`) is forwarded to the
/// query endpoint unchanged; the endpoint owns that semantic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub severities: BTreeSet<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Clamped into [0, 1] before any query is built.
    pub confidence_min: f64,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one checkbox toggle. Unknown levels outside 1..=5 are ignored.
    pub fn toggle_severity(&mut self, level: u8, selected: bool) {
        if !(1..=5).contains(&level) {
            return;
        }
        if selected {
            self.severities.insert(level);
        } else {
            self.severities.remove(&level);
        }
    }

    pub fn set_confidence(&mut self, clamped: f64) {
        // `+ 0.0` folds negative zero, keeping displays and queries aligned.
        self.confidence_min = clamped.clamp(0.0, 1.0) + 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_is_order_independent_and_unique() {
        let mut a = FilterState::new();
        a.toggle_severity(3, true);
        a.toggle_severity(1, true);
        a.toggle_severity(3, true);

        let mut b = FilterState::new();
        b.toggle_severity(1, true);
        b.toggle_severity(3, true);

        assert_eq!(a, b);
        assert_eq!(a.severities.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn out_of_range_levels_are_ignored() {
        let mut state = FilterState::new();
        state.toggle_severity(0, true);
        state.toggle_severity(6, true);
        assert!(state.severities.is_empty());
    }

    #[test]
    fn set_confidence_clamps() {
        let mut state = FilterState::new();
        state.set_confidence(1.7);
        assert_eq!(state.confidence_min, 1.0);
        state.set_confidence(-0.2);
        assert_eq!(state.confidence_min, 0.0);
    }
}
