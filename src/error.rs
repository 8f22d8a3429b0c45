//! # Error
//!
//! $$
//! \text{simulate}:\ (\theta, \omega)\mapsto X \;\vee\; \bot
//! $$
//!
use thiserror::Error;

/// Failure modes of the simulation engine.
///
/// Arithmetic in the update rule is total, so the only failures are a
/// rejected configuration or a random source that cannot supply a draw.
/// Either aborts the whole call; no partial trajectory is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
  /// The configuration was rejected before any draw was taken.
  #[error("invalid simulation config: {reason}")]
  InvalidConfig { reason: String },

  /// The injected random source ran dry.
  #[error("random source exhausted while drawing a {requested} variate")]
  RandomSourceExhausted { requested: &'static str },
}

impl SimulationError {
  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    SimulationError::InvalidConfig {
      reason: reason.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn invalid_config_message_carries_reason() {
    let err = SimulationError::invalid("num_steps must be positive");

    assert_eq!(
      err.to_string(),
      "invalid simulation config: num_steps must be positive"
    );
  }

  #[test]
  fn exhausted_message_names_the_draw() {
    let err = SimulationError::RandomSourceExhausted {
      requested: "uniform",
    };

    assert!(err.to_string().contains("uniform"));
  }
}
