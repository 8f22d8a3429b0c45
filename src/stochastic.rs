//! # Stochastic
//!
//! $$
//! dX_t=\mu_{z(X_t)}\,dt+\sigma_{z(X_t)}^2\,dW_t,\qquad X_{\tau}=x_0\ \text{at reset times } \tau
//! $$
//!
//! | Module        | Description                                                                  |
//! |---------------|------------------------------------------------------------------------------|
//! | [`config`]    | Immutable parameter bundle, presets for the basic and switching variants.    |
//! | [`regime`]    | Two-regime classifier over the half-open interval `(lower, upper]`.          |
//! | [`noise`]     | Per-step death and diffusion draws in canonical order.                       |
//! | [`process`]   | The vectorized multi-path engine.                                            |
//! | [`long_run`]  | Terminal-value sampling of the long-run distribution.                        |
//!
//! ## Parallelism
//!
//! Time steps are strictly sequential. Within a step, paths are advanced as a
//! `rayon` parallel map once the step's draws have been taken, so results do not
//! depend on the thread count. `sample_long_run_par` fans independent runs out
//! over `rayon` with per-run seeded sources.

pub mod config;
pub mod long_run;
pub mod noise;
pub mod process;
pub mod regime;

use rand::Rng;
use rand_distr::Distribution;
use rand_distr::StandardNormal;

use crate::traits::FloatExt;

pub use crate::traits::ProcessExt;

/// Default number of time steps
pub const N: usize = 1000;
/// Default initial value
pub const X0: f64 = 0.0;
/// Default step size
pub const DT: f64 = 0.1;
/// Default death (reset) rate
pub const DEATH_RATE: f64 = 0.05;

impl FloatExt for f64 {
  fn from_usize_(n: usize) -> Self {
    n as f64
  }

  fn from_f64_fast(v: f64) -> Self {
    v
  }

  fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
    StandardNormal.sample(rng)
  }

  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.gen::<f64>()
  }
}

impl FloatExt for f32 {
  fn from_usize_(n: usize) -> Self {
    n as f32
  }

  fn from_f64_fast(v: f64) -> Self {
    v as f32
  }

  fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
    StandardNormal.sample(rng)
  }

  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.gen::<f32>()
  }
}
