//! # Config
//!
//! $$
//! \theta=(T,\ R,\ x_0,\ \mu_{\text{out}},\mu_{\text{in}},\ \sigma_{\text{out}},\sigma_{\text{in}},\ u,\ \ell,\ \Delta t,\ \lambda)
//! $$
//!
//! Presets mirror the classic variants of the model: plain Brownian motion,
//! a single cutoff below which the second parameter set applies, and a band
//! between two cutoffs where it applies. Each can be combined with a reset
//! rate through [`SimulationConfig::with_death_rate`].
use crate::error::Result;
use crate::error::SimulationError;
use crate::stochastic::regime::Cutoffs;
use crate::stochastic::regime::RegimePair;
use crate::stochastic::DT;
use crate::stochastic::N;
use crate::stochastic::X0;
use crate::traits::FloatExt;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig<T> {
  /// Number of time steps `T`.
  pub num_steps: usize,
  /// Number of independent paths `R`.
  pub num_paths: usize,
  /// Starting value, and the value a path resets to on death.
  pub initial_value: T,
  pub drift: RegimePair<T>,
  pub volatility: RegimePair<T>,
  pub cutoffs: Cutoffs<T>,
  pub time_step: T,
  /// Hazard rate of a reset; the per-step probability is `death_rate * time_step`.
  pub death_rate: T,
  /// Return the `R x T` death event matrix alongside the trajectories.
  pub track_deaths: bool,
}

impl<T: FloatExt> Default for SimulationConfig<T> {
  fn default() -> Self {
    Self::basic(
      N,
      T::from_f64_fast(X0),
      T::zero(),
      T::one(),
      T::from_f64_fast(DT),
    )
  }
}

impl<T: FloatExt> SimulationConfig<T> {
  /// Single-regime Brownian motion without resets.
  pub fn basic(num_steps: usize, x0: T, mu: T, sigma: T, dt: T) -> Self {
    Self {
      num_steps,
      num_paths: 1,
      initial_value: x0,
      drift: RegimePair::constant(mu),
      volatility: RegimePair::constant(sigma),
      cutoffs: Cutoffs::degenerate(),
      time_step: dt,
      death_rate: T::zero(),
      track_deaths: false,
    }
  }

  /// `mus[0]`/`sigmas[0]` apply above `cut`, `mus[1]`/`sigmas[1]` at or below it.
  pub fn single_switch(
    num_steps: usize,
    x0: T,
    mus: [T; 2],
    sigmas: [T; 2],
    cut: T,
    dt: T,
  ) -> Self {
    Self {
      drift: mus.into(),
      volatility: sigmas.into(),
      cutoffs: Cutoffs::new(cut, T::neg_infinity()),
      ..Self::basic(num_steps, x0, mus[0], sigmas[0], dt)
    }
  }

  /// `mus[1]`/`sigmas[1]` apply inside `(cut[1], cut[0]]`, the first set outside.
  pub fn double_switch(
    num_steps: usize,
    x0: T,
    mus: [T; 2],
    sigmas: [T; 2],
    cut: [T; 2],
    dt: T,
  ) -> Self {
    Self {
      drift: mus.into(),
      volatility: sigmas.into(),
      cutoffs: Cutoffs::new(cut[0], cut[1]),
      ..Self::basic(num_steps, x0, mus[0], sigmas[0], dt)
    }
  }

  pub fn with_steps(mut self, num_steps: usize) -> Self {
    self.num_steps = num_steps;
    self
  }

  pub fn with_paths(mut self, num_paths: usize) -> Self {
    self.num_paths = num_paths;
    self
  }

  pub fn with_initial_value(mut self, x0: T) -> Self {
    self.initial_value = x0;
    self
  }

  pub fn with_death_rate(mut self, death_rate: T) -> Self {
    self.death_rate = death_rate;
    self
  }

  pub fn with_death_tracking(mut self, track_deaths: bool) -> Self {
    self.track_deaths = track_deaths;
    self
  }

  /// Per-step reset probability `death_rate * time_step`.
  ///
  /// Only meaningful while it stays below one; that is left to the caller.
  pub fn death_probability(&self) -> T {
    self.death_rate * self.time_step
  }

  pub fn validate(&self) -> Result<()> {
    if self.num_steps == 0 {
      return Err(SimulationError::invalid("num_steps must be positive"));
    }
    if self.num_paths == 0 {
      return Err(SimulationError::invalid("num_paths must be positive"));
    }
    if !(self.time_step.is_finite() && self.time_step > T::zero()) {
      return Err(SimulationError::invalid(format!(
        "time_step must be positive and finite, got {:?}",
        self.time_step
      )));
    }
    if !(self.death_rate.is_finite() && self.death_rate >= T::zero()) {
      return Err(SimulationError::invalid(format!(
        "death_rate must be non-negative and finite, got {:?}",
        self.death_rate
      )));
    }
    if self.cutoffs.upper.is_nan() || self.cutoffs.lower.is_nan() {
      return Err(SimulationError::invalid("regime cutoffs must not be NaN"));
    }
    if self.cutoffs.upper < self.cutoffs.lower {
      return Err(SimulationError::invalid(format!(
        "upper cutoff {:?} is below lower cutoff {:?}",
        self.cutoffs.upper, self.cutoffs.lower
      )));
    }
    let finite = [
      ("initial_value", self.initial_value),
      ("drift.outer", self.drift.outer),
      ("drift.inner", self.drift.inner),
      ("volatility.outer", self.volatility.outer),
      ("volatility.inner", self.volatility.inner),
    ];
    if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
      return Err(SimulationError::invalid(format!(
        "{name} must be finite, got {value:?}"
      )));
    }

    Ok(())
  }
}
