use crate::domain::Knob;

/// Errors raised at the boundary of the projection engine.
///
/// The engine itself is total; these are produced by input guards and by the
/// summary metrics that divide by projected quantities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error(
        "invalid scenario input: {} = {:+.1}% ({}) is outside [{:+.1}%, {:+.1}%]",
        .knob.display_name(),
        .value * 100.0,
        scope_label(.year),
        .min * 100.0,
        .max * 100.0
    )]
    InvalidScenarioInput {
        knob: Knob,
        year: Option<usize>,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid scenario input: mix shift {:+.1}% drives the {grade} share negative in Year {year} ({share:.4})", .mix_shift * 100.0)]
    NegativeShare {
        year: usize,
        grade: &'static str,
        mix_shift: f64,
        share: f64,
    },

    #[error("degenerate projection in Year {year}: {reason}")]
    DegenerateProjection { year: usize, reason: &'static str },

    #[error("invalid override '{0}' (expected YEAR:KNOB=PCT, e.g. 2:price=15)")]
    InvalidOverride(String),
}

fn scope_label(year: &Option<usize>) -> String {
    match year {
        Some(y) => format!("Year {y}"),
        None => "all years".to_string(),
    }
}

/// Application-level error carrying the process exit code.
///
/// Exit codes: 2 = bad input, 3 = access denied, 4 = terminal/runtime failure.
#[derive(Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<ScenarioError> for AppError {
    fn from(err: ScenarioError) -> Self {
        AppError::new(2, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_error_maps_to_bad_input_exit_code() {
        let err = ScenarioError::InvalidScenarioInput {
            knob: Knob::Volume,
            year: Some(2),
            value: 0.75,
            min: -0.5,
            max: 0.5,
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("Volume"));
        assert!(app.to_string().contains("Year 2"));
        assert!(app.to_string().contains("+75.0%"));
    }
}
