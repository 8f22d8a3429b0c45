//! # Regime
//!
//! $$
//! z(x)=\begin{cases}\text{inner} & \ell < x \le u\\ \text{outer} & \text{otherwise}\end{cases}
//! $$
//!
use impl_new_derive::ImplNew;

use crate::traits::FloatExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
  /// `x <= lower` or `x > upper`.
  Outer,
  /// `lower < x <= upper`, the risk-taking band.
  Inner,
}

/// One parameter per regime.
#[derive(Clone, Copy, Debug, PartialEq, ImplNew)]
pub struct RegimePair<T> {
  pub outer: T,
  pub inner: T,
}

impl<T: Copy> RegimePair<T> {
  /// Same value in both regimes.
  pub fn constant(value: T) -> Self {
    Self {
      outer: value,
      inner: value,
    }
  }

  #[inline]
  pub fn select(&self, regime: Regime) -> T {
    match regime {
      Regime::Outer => self.outer,
      Regime::Inner => self.inner,
    }
  }
}

impl<T: Copy> From<[T; 2]> for RegimePair<T> {
  /// `[outer, inner]`, the order the presets take their parameters in.
  fn from([outer, inner]: [T; 2]) -> Self {
    Self { outer, inner }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, ImplNew)]
pub struct Cutoffs<T> {
  pub upper: T,
  pub lower: T,
}

impl<T: FloatExt> Cutoffs<T> {
  /// `upper == lower == 0`: the inner band is empty and only the outer
  /// parameters ever apply.
  pub fn degenerate() -> Self {
    Self {
      upper: T::zero(),
      lower: T::zero(),
    }
  }

  #[inline]
  pub fn classify(&self, x: T) -> Regime {
    if self.lower < x && x <= self.upper {
      Regime::Inner
    } else {
      Regime::Outer
    }
  }

  pub fn is_degenerate(&self) -> bool {
    self.upper <= self.lower
  }
}
