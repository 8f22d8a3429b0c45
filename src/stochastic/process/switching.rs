//! # Regime-switching Brownian motion with resets
//!
//! $$
//! X_{k+1}=\begin{cases}x_0 & u_k<\lambda\Delta t\\ X_k+\mu_{z(X_k)}\Delta t+\sigma_{z(X_k)}^2\varepsilon_k\Delta t & \text{otherwise}\end{cases}
//! $$
//!
//! The diffusion term scales the normal draw by `sigma^2 * dt`, not by the
//! textbook `sigma * sqrt(dt)`. This is the model's literal discretization and
//! is kept as is; it is not a standard Euler-Maruyama scheme.
//!
//! The regime is read from the value a path enters the step with.
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::Zip;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::random::RandomSource;
use crate::stochastic::config::SimulationConfig;
use crate::stochastic::noise::StepNoise;
use crate::stochastic::regime::Cutoffs;
use crate::stochastic::regime::RegimePair;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Below this many paths a step is advanced on the calling thread.
const PAR_THRESHOLD: usize = 4096;

/// Output of one engine call.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectories<T> {
  /// `R x T`, row `r` is path `r`, column `k` is step `k`.
  pub values: Array2<T>,
  /// `R x T` reset indicators, present when the config tracks deaths.
  pub deaths: Option<Array2<bool>>,
}

impl<T: FloatExt> Trajectories<T> {
  pub fn num_paths(&self) -> usize {
    self.values.nrows()
  }

  pub fn num_steps(&self) -> usize {
    self.values.ncols()
  }

  pub fn path(&self, r: usize) -> ArrayView1<'_, T> {
    self.values.row(r)
  }

  /// Value of every path at the last step.
  pub fn terminal(&self) -> Array1<T> {
    match self.num_steps() {
      0 => Array1::zeros(self.num_paths()),
      n => self.values.column(n - 1).to_owned(),
    }
  }
}

/// The scalar update rule, shared by every path of a step.
#[derive(Clone, Copy, Debug)]
struct StepLaw<T> {
  initial_value: T,
  drift: RegimePair<T>,
  volatility: RegimePair<T>,
  cutoffs: Cutoffs<T>,
  dt: T,
}

impl<T: FloatExt> StepLaw<T> {
  #[inline]
  fn advance(&self, x: T, died: bool, eps: T) -> T {
    if died {
      return self.initial_value;
    }
    let regime = self.cutoffs.classify(x);
    let mu = self.drift.select(regime);
    let sigma = self.volatility.select(regime);
    x + mu * self.dt + sigma.powi(2) * eps * self.dt
  }
}

pub struct RegimeSwitchingBm<T: FloatExt> {
  pub config: SimulationConfig<T>,
}

impl<T: FloatExt> RegimeSwitchingBm<T> {
  pub fn new(config: SimulationConfig<T>) -> Self {
    Self { config }
  }

  fn law(&self) -> StepLaw<T> {
    StepLaw {
      initial_value: self.config.initial_value,
      drift: self.config.drift,
      volatility: self.config.volatility,
      cutoffs: self.config.cutoffs,
      dt: self.config.time_step,
    }
  }

  /// Value of a path entering a step at `x`, given that step's reset flag and
  /// normal draw.
  pub fn step(&self, x: T, died: bool, eps: T) -> T {
    self.law().advance(x, died, eps)
  }

  /// Advances every path of `state` by one step in place.
  pub fn advance(&self, state: &mut Array1<T>, noise: &StepNoise<T>) {
    let law = self.law();
    let zip = Zip::from(state).and(noise.deaths()).and(noise.eps());
    if noise.len() < PAR_THRESHOLD {
      zip.for_each(|x, &died, &eps| *x = law.advance(*x, died, eps));
    } else {
      zip.par_for_each(|x, &died, &eps| *x = law.advance(*x, died, eps));
    }
  }

  /// Simulates `num_paths` paths for `num_steps` steps.
  ///
  /// Draws are consumed step by step in canonical order (see
  /// [`StepNoise::draw`]), so a given seeded source yields bit-identical output
  /// regardless of how many threads advance the paths.
  #[tracing::instrument(
    level = "debug",
    skip_all,
    fields(paths = self.config.num_paths, steps = self.config.num_steps)
  )]
  pub fn simulate<R: RandomSource<T> + ?Sized>(&self, rng: &mut R) -> Result<Trajectories<T>> {
    let config = &self.config;
    config.validate()?;

    let death_probability = config.death_probability();
    if death_probability >= T::one() {
      warn!(
        ?death_probability,
        "death_rate * time_step >= 1, every path resets at every step"
      );
    }

    let (r, n) = (config.num_paths, config.num_steps);
    let mut values = Array2::<T>::zeros((r, n));
    let mut deaths = config
      .track_deaths
      .then(|| Array2::<bool>::from_elem((r, n), false));
    let mut state = Array1::<T>::from_elem(r, config.initial_value);
    let mut noise = StepNoise::new(r);

    for k in 0..n {
      noise.draw(rng, death_probability)?;
      self.advance(&mut state, &noise);
      values.column_mut(k).assign(&state);
      if let Some(deaths) = deaths.as_mut() {
        deaths.column_mut(k).assign(&noise.deaths());
      }
    }

    debug!("simulation finished");
    Ok(Trajectories { values, deaths })
  }
}

impl<T: FloatExt> ProcessExt<T> for RegimeSwitchingBm<T> {
  type Output = Trajectories<T>;

  fn sample_with<R: RandomSource<T> + ?Sized>(&self, rng: &mut R) -> Result<Self::Output> {
    self.simulate(rng)
  }
}
