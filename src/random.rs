//! # Random
//!
//! $$
//! \omega\mapsto(\varepsilon_1,\varepsilon_2,\dots),\ \varepsilon_i\sim\mathcal N(0,1);\qquad (u_1,u_2,\dots),\ u_i\sim\mathcal U[0,1)
//! $$
//!
//! The engine never touches a global generator. Every draw goes through a
//! [`RandomSource`], so runs are reproducible for a fixed seed and tests can
//! script the exact draw sequence.
use std::collections::VecDeque;

use impl_new_derive::ImplNew;
use rand::rngs::StdRng;
use rand::rngs::ThreadRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::error::SimulationError;
use crate::traits::FloatExt;

/// Capability to produce independent standard-normal and uniform draws.
pub trait RandomSource<T: FloatExt> {
  fn next_normal(&mut self) -> Result<T>;

  fn next_uniform(&mut self) -> Result<T>;

  fn fill_normal(&mut self, out: &mut [T]) -> Result<()> {
    for x in out.iter_mut() {
      *x = self.next_normal()?;
    }
    Ok(())
  }

  fn fill_uniform(&mut self, out: &mut [T]) -> Result<()> {
    for x in out.iter_mut() {
      *x = self.next_uniform()?;
    }
    Ok(())
  }
}

impl<T: FloatExt, S: RandomSource<T> + ?Sized> RandomSource<T> for &mut S {
  fn next_normal(&mut self) -> Result<T> {
    (**self).next_normal()
  }

  fn next_uniform(&mut self) -> Result<T> {
    (**self).next_uniform()
  }

  fn fill_normal(&mut self, out: &mut [T]) -> Result<()> {
    (**self).fill_normal(out)
  }

  fn fill_uniform(&mut self, out: &mut [T]) -> Result<()> {
    (**self).fill_uniform(out)
  }
}

#[inline(always)]
fn splitmix64_next(state: &mut u64) -> u64 {
  *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
  let mut z = *state;
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  z ^ (z >> 31)
}

/// Seed of the `stream`-th independent sub-stream of `seed`.
///
/// Used to hand every parallel run its own generator so the output does not
/// depend on how rayon schedules the runs.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
  let mut state = stream;
  let mut mixed = seed ^ splitmix64_next(&mut state);
  splitmix64_next(&mut mixed)
}

/// `StdRng` seeded from a `u64`.
#[derive(Clone, Debug)]
pub struct SeededSource {
  inner: StdRng,
  seed: u64,
}

impl SeededSource {
  pub fn from_seed(seed: u64) -> Self {
    Self {
      inner: StdRng::seed_from_u64(seed),
      seed,
    }
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }
}

impl<T: FloatExt> RandomSource<T> for SeededSource {
  #[inline]
  fn next_normal(&mut self) -> Result<T> {
    Ok(T::sample_standard_normal(&mut self.inner))
  }

  #[inline]
  fn next_uniform(&mut self) -> Result<T> {
    Ok(T::sample_uniform(&mut self.inner))
  }
}

/// Entropy-seeded thread-local generator, for runs that need no replay.
#[derive(Clone, Debug, Default)]
pub struct ThreadSource {
  inner: ThreadRng,
}

impl ThreadSource {
  pub fn new() -> Self {
    Self {
      inner: rand::thread_rng(),
    }
  }
}

impl<T: FloatExt> RandomSource<T> for ThreadSource {
  #[inline]
  fn next_normal(&mut self) -> Result<T> {
    Ok(T::sample_standard_normal(&mut self.inner))
  }

  #[inline]
  fn next_uniform(&mut self) -> Result<T> {
    Ok(T::sample_uniform(&mut self.inner))
  }
}

/// Returns the same normal and uniform value forever.
///
/// A uniform of `1.0` never triggers a reset, since resets fire on `u < λΔt`.
#[derive(Clone, Copy, Debug, ImplNew)]
pub struct ConstantSource<T> {
  pub normal: T,
  pub uniform: T,
}

impl<T: FloatExt> RandomSource<T> for ConstantSource<T> {
  fn next_normal(&mut self) -> Result<T> {
    Ok(self.normal)
  }

  fn next_uniform(&mut self) -> Result<T> {
    Ok(self.uniform)
  }
}

/// Replays recorded draws in order and fails once a queue is drained.
#[derive(Clone, Debug, Default)]
pub struct ReplaySource<T> {
  normals: VecDeque<T>,
  uniforms: VecDeque<T>,
}

impl<T: FloatExt> ReplaySource<T> {
  pub fn new(normals: Vec<T>, uniforms: Vec<T>) -> Self {
    Self {
      normals: normals.into(),
      uniforms: uniforms.into(),
    }
  }

  /// Draws still available as `(normals, uniforms)`.
  pub fn remaining(&self) -> (usize, usize) {
    (self.normals.len(), self.uniforms.len())
  }
}

impl<T: FloatExt> RandomSource<T> for ReplaySource<T> {
  fn next_normal(&mut self) -> Result<T> {
    self
      .normals
      .pop_front()
      .ok_or(SimulationError::RandomSourceExhausted {
        requested: "standard normal",
      })
  }

  fn next_uniform(&mut self) -> Result<T> {
    self
      .uniforms
      .pop_front()
      .ok_or(SimulationError::RandomSourceExhausted {
        requested: "uniform",
      })
  }
}
