//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:(\theta,\ \text{random source})\to\text{samples}
//! $$
//!
use std::fmt::Debug;
use std::iter::Sum;
use std::ops::AddAssign;
use std::ops::SubAssign;

use ndarray::ScalarOperand;
use rand::Rng;
use rayon::prelude::*;

use crate::error::Result;
use crate::random::RandomSource;
use crate::random::ThreadSource;

pub trait FloatExt:
  num_traits::Float
  + num_traits::FromPrimitive
  + Sum
  + Default
  + Debug
  + Send
  + Sync
  + ScalarOperand
  + AddAssign
  + SubAssign
  + 'static
{
  fn from_usize_(n: usize) -> Self;
  fn from_f64_fast(v: f64) -> Self;
  fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;
  /// Uniform draw on `[0, 1)`.
  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

pub trait ProcessExt<T: FloatExt>: Send + Sync {
  type Output: Send;

  fn sample_with<R: RandomSource<T> + ?Sized>(&self, rng: &mut R) -> Result<Self::Output>;

  fn sample(&self) -> Result<Self::Output> {
    self.sample_with(&mut ThreadSource::new())
  }

  fn sample_par(&self, m: usize) -> Result<Vec<Self::Output>> {
    (0..m).into_par_iter().map(|_| self.sample()).collect()
  }
}
