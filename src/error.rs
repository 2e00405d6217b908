// error.rs - Construction-time configuration errors
//
// The choreography math itself cannot fail. Everything that could produce a
// pose snap or a NaN is rejected here, before the first frame.

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("expected {expected} act boundaries, got {got}")]
    ActCount { expected: usize, got: usize },

    #[error("act boundaries must start at 0 and end at 1, got [{first}, {last}]")]
    ActCoverage { first: f64, last: f64 },

    #[error("act boundary {index} ({value}) is not strictly after the previous one")]
    ActOrder { index: usize, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("orbit entry [{start}, {end}] must be non-empty and lie inside the final act [{act_start}, 1]")]
    OrbitEntry { start: f64, end: f64, act_start: f64 },

    #[error("effect window for {effect} is invalid: {reason}")]
    EffectWindow { effect: &'static str, reason: String },

    #[error("camera smoothing must be in (0, 1], got {0}")]
    Smoothing(f64),

    #[error("invalid scene config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Reject NaN and infinities for a named config field.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
