/// Outcome of validating a raw confidence entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// Authoritative value in [0, 1], rounded to two decimals.
    pub value: f64,
    /// Transient message for the UI when the entry had to be corrected.
    pub message: Option<String>,
}

const RANGE_MESSAGE: &str = "Confidence must be 0.00–1.00";

/// Clamps and formats the confidence threshold typed into the filter panel.
pub struct ConfidenceValidator;

impl ConfidenceValidator {
    /// Parses `raw` as a decimal, clamping out-of-range or unparsable
    /// entries to the nearest bound (unparsable becomes 0). Pure; the
    /// caller writes the corrected value back into state and the UI.
    pub fn validate(raw: &str) -> Validated {
        let parsed = raw.trim().parse::<f64>();
        match parsed {
            Ok(value) if value.is_nan() => Validated {
                value: 0.0,
                message: Some(RANGE_MESSAGE.to_string()),
            },
            Ok(value) if value < 0.0 => Validated {
                value: 0.0,
                message: Some(RANGE_MESSAGE.to_string()),
            },
            Ok(value) if value > 1.0 => Validated {
                value: 1.0,
                message: Some(RANGE_MESSAGE.to_string()),
            },
            Ok(value) => Validated {
                value: round_two_places(value),
                message: None,
            },
            Err(_) => Validated {
                value: 0.0,
                message: Some(RANGE_MESSAGE.to_string()),
            },
        }
    }
}

fn round_two_places(value: f64) -> f64 {
    // `+ 0.0` folds negative zero, so "-0.0" and "0.0" agree everywhere.
    (value * 100.0).round() / 100.0 + 0.0
}
