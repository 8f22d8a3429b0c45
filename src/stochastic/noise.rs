//! # Noise
//!
//! $$
//! (u_{k,1},\dots,u_{k,R}),\ (\varepsilon_{k,1},\dots,\varepsilon_{k,R}),\qquad d_{k,r}=\mathbf 1\{u_{k,r}<\lambda\Delta t\}
//! $$
//!
//! All randomness of one step, taken in canonical order: the `R` uniforms for
//! the reset decision first, then the `R` standard normals, both in path-index
//! order. Normals are drawn for every path, including those that reset.
use ndarray::ArrayView1;

use crate::error::Result;
use crate::random::RandomSource;
use crate::traits::FloatExt;

#[derive(Clone, Debug)]
pub struct StepNoise<T: FloatExt> {
  uniforms: Vec<T>,
  eps: Vec<T>,
  deaths: Vec<bool>,
}

impl<T: FloatExt> StepNoise<T> {
  pub fn new(num_paths: usize) -> Self {
    Self {
      uniforms: vec![T::zero(); num_paths],
      eps: vec![T::zero(); num_paths],
      deaths: vec![false; num_paths],
    }
  }

  /// Refills the buffers with the next step's draws.
  ///
  /// On error the buffers hold a partially drawn step and must not be used.
  pub fn draw<R: RandomSource<T> + ?Sized>(&mut self, rng: &mut R, death_probability: T) -> Result<()> {
    rng.fill_uniform(&mut self.uniforms)?;
    rng.fill_normal(&mut self.eps)?;
    for (died, &u) in self.deaths.iter_mut().zip(self.uniforms.iter()) {
      *died = u < death_probability;
    }
    Ok(())
  }

  pub fn len(&self) -> usize {
    self.eps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.eps.is_empty()
  }

  pub fn eps(&self) -> ArrayView1<'_, T> {
    ArrayView1::from(&self.eps[..])
  }

  pub fn deaths(&self) -> ArrayView1<'_, bool> {
    ArrayView1::from(&self.deaths[..])
  }
}
