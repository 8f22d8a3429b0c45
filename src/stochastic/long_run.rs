//! # Long-run distribution
//!
//! $$
//! \hat F(x)=\frac1{M}\sum_{i=1}^{M}\mathbf 1\{X^{(i)}_{T-1}\le x\}
//! $$
//!
//! Treats the terminal value of a long path as one draw from the stationary
//! distribution. Nothing here checks convergence: `num_steps` has to be long
//! enough for the process to forget its start, and that is on the caller.
use ndarray::Array1;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::error::SimulationError;
use crate::random::derive_seed;
use crate::random::RandomSource;
use crate::random::SeededSource;
use crate::stochastic::config::SimulationConfig;
use crate::stochastic::process::switching::RegimeSwitchingBm;
use crate::traits::FloatExt;

/// Simulates one path of `config`, ignoring its `num_paths`.
pub fn simulate_path<T, R>(config: &SimulationConfig<T>, rng: &mut R) -> Result<Array1<T>>
where
  T: FloatExt,
  R: RandomSource<T> + ?Sized,
{
  let single = config.clone().with_paths(1).with_death_tracking(false);
  let trajectories = RegimeSwitchingBm::new(single).simulate(rng)?;
  Ok(trajectories.values.row(0).to_owned())
}

fn terminal_value<T: FloatExt>(path: &Array1<T>) -> Result<T> {
  path
    .last()
    .copied()
    .ok_or_else(|| SimulationError::invalid("single-path simulator returned an empty path"))
}

fn check_obs(obs: usize) -> Result<()> {
  if obs == 0 {
    return Err(SimulationError::invalid("obs must be positive"));
  }
  Ok(())
}

/// Runs `single_path` `obs` times against the shared source and keeps the last
/// value of each run.
///
/// Runs draw from `rng` back to back, so a seeded source makes the whole sample
/// reproducible.
#[tracing::instrument(level = "debug", skip(single_path, config, rng))]
pub fn sample_long_run<T, R, F>(
  mut single_path: F,
  config: &SimulationConfig<T>,
  obs: usize,
  rng: &mut R,
) -> Result<Array1<T>>
where
  T: FloatExt,
  R: RandomSource<T> + ?Sized,
  F: FnMut(&SimulationConfig<T>, &mut R) -> Result<Array1<T>>,
{
  check_obs(obs)?;
  let mut end_vals = Array1::<T>::zeros(obs);

  for v in end_vals.iter_mut() {
    let path = single_path(config, rng)?;
    *v = terminal_value(&path)?;
  }

  debug!("long-run sample collected");
  Ok(end_vals)
}

/// Parallel [`sample_long_run`] over [`simulate_path`].
///
/// Run `i` owns a [`SeededSource`] seeded with `derive_seed(seed, i)`, so the
/// sample is the same for any thread count.
#[tracing::instrument(level = "debug", skip(config))]
pub fn sample_long_run_par<T: FloatExt>(
  config: &SimulationConfig<T>,
  obs: usize,
  seed: u64,
) -> Result<Array1<T>> {
  check_obs(obs)?;
  config.validate()?;

  let end_vals = (0..obs)
    .into_par_iter()
    .map(|i| {
      let mut rng = SeededSource::from_seed(derive_seed(seed, i as u64));
      terminal_value(&simulate_path(config, &mut rng)?)
    })
    .collect::<Result<Vec<T>>>()?;

  debug!("long-run sample collected");
  Ok(Array1::from_vec(end_vals))
}

/// Long-run sample from a single `obs`-path engine call.
///
/// Same distribution as [`sample_long_run`], but the draws interleave across
/// paths, so the values differ from the run-by-run version for the same seed.
pub fn sample_long_run_vectorized<T, R>(
  config: &SimulationConfig<T>,
  obs: usize,
  rng: &mut R,
) -> Result<Array1<T>>
where
  T: FloatExt,
  R: RandomSource<T> + ?Sized,
{
  check_obs(obs)?;
  let batch = config.clone().with_paths(obs).with_death_tracking(false);
  Ok(RegimeSwitchingBm::new(batch).simulate(rng)?.terminal())
}

#[cfg(test)]
mod tests {
  use anyhow::Result;
  use statrs::distribution::ContinuousCDF;
  use statrs::distribution::Normal;

  use super::*;
  use crate::random::ReplaySource;
  use crate::stochastic::DEATH_RATE;
  use crate::stochastic::DT;
  use crate::stochastic::X0;

  fn switching_config(n: usize) -> SimulationConfig<f64> {
    SimulationConfig::double_switch(n, X0, [0.0, -0.1], [1.0, 1.2], [-1.0, -2.0], DT)
      .with_death_rate(DEATH_RATE)
  }

  fn mean_and_variance(xs: &Array1<f64>) -> (f64, f64) {
    let n = f64::from_usize_(xs.len());
    let mean = xs.sum() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
  }

  #[test]
  fn long_run_length_equals_obs() -> Result<()> {
    let mut rng = SeededSource::from_seed(1);
    let sample = sample_long_run(simulate_path, &switching_config(200), 100, &mut rng)?;

    assert_eq!(sample.len(), 100);
    assert!(sample.iter().all(|x| x.is_finite()));
    Ok(())
  }

  #[test]
  fn long_run_keeps_terminal_value_of_each_run() -> Result<()> {
    let config = switching_config(150);
    let sample = sample_long_run(
      simulate_path,
      &config,
      20,
      &mut SeededSource::from_seed(9),
    )?;

    let mut rng = SeededSource::from_seed(9);
    for &v in sample.iter() {
      let path = simulate_path(&config, &mut rng)?;
      assert_eq!(v.to_bits(), path[149].to_bits());
    }
    Ok(())
  }

  #[test]
  fn long_run_accepts_custom_simulator() -> Result<()> {
    let mut calls = 0;
    let sample = sample_long_run(
      |config: &SimulationConfig<f64>, rng: &mut SeededSource| {
        calls += 1;
        simulate_path(&config.clone().with_initial_value(5.0), rng)
      },
      &SimulationConfig::basic(1, 0.0, 0.0, 0.0, DT),
      7,
      &mut SeededSource::from_seed(2),
    )?;

    assert_eq!(calls, 7);
    assert!(sample.iter().all(|&x| x == 5.0));
    Ok(())
  }

  #[test]
  fn long_run_rejects_empty_paths() {
    let err = sample_long_run(
      |_: &SimulationConfig<f64>, _: &mut SeededSource| Ok(Array1::zeros(0)),
      &SimulationConfig::default(),
      3,
      &mut SeededSource::from_seed(0),
    )
    .unwrap_err();

    assert!(matches!(err, SimulationError::InvalidConfig { .. }));
  }

  #[test]
  fn long_run_rejects_zero_obs() {
    let err = sample_long_run(
      simulate_path,
      &SimulationConfig::<f64>::default(),
      0,
      &mut SeededSource::from_seed(0),
    )
    .unwrap_err();

    assert!(matches!(err, SimulationError::InvalidConfig { .. }));
  }

  #[test]
  fn long_run_propagates_exhaustion() {
    // One step per run: two runs fit, the third does not.
    let config = SimulationConfig::<f64>::basic(1, 0.0, 0.0, 1.0, DT);
    let mut rng = ReplaySource::new(vec![0.0; 2], vec![1.0; 3]);

    let err = sample_long_run(simulate_path, &config, 3, &mut rng).unwrap_err();

    assert!(matches!(err, SimulationError::RandomSourceExhausted { .. }));
  }

  #[test]
  fn parallel_long_run_is_reproducible() -> Result<()> {
    let config = switching_config(300);
    let a = sample_long_run_par(&config, 256, 42)?;
    let b = sample_long_run_par(&config, 256, 42)?;
    let c = sample_long_run_par(&config, 256, 43)?;

    assert_eq!(a, b);
    assert_ne!(a, c);
    Ok(())
  }

  #[test]
  fn parallel_long_run_matches_per_run_seeds() -> Result<()> {
    let config = switching_config(100);
    let sample = sample_long_run_par(&config, 16, 7)?;

    for (i, &v) in sample.iter().enumerate() {
      let mut rng = SeededSource::from_seed(derive_seed(7, i as u64));
      let path = simulate_path(&config, &mut rng)?;
      assert_eq!(v.to_bits(), path[99].to_bits());
    }
    Ok(())
  }

  #[test]
  fn vectorized_long_run_has_obs_entries() -> Result<()> {
    let sample = sample_long_run_vectorized(
      &switching_config(250),
      500,
      &mut SeededSource::from_seed(3),
    )?;

    assert_eq!(sample.len(), 500);
    Ok(())
  }

  #[test]
  fn single_regime_terminal_distribution_is_normal() -> Result<()> {
    // X_{T-1} ~ N(x0 + T mu dt, T (sigma^2 dt)^2) without resets.
    let (steps, mu, sigma, dt) = (100usize, 0.5f64, 1.0f64, 0.1f64);
    let config = SimulationConfig::basic(steps, 0.0, mu, sigma, dt);
    let sample = sample_long_run_par(&config, 4000, 2024)?;

    let expected_mean = steps as f64 * mu * dt;
    let expected_var = steps as f64 * (sigma * sigma * dt).powi(2);
    let (mean, var) = mean_and_variance(&sample);
    assert!((mean - expected_mean).abs() < 0.1, "mean {mean}");
    assert!((var / expected_var - 1.0).abs() < 0.1, "var {var}");

    let reference = Normal::new(expected_mean, expected_var.sqrt())?;
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    let ks = sorted
      .iter()
      .enumerate()
      .map(|(i, &x)| {
        let cdf = reference.cdf(x);
        (cdf - i as f64 / n).abs().max((cdf - (i + 1) as f64 / n).abs())
      })
      .fold(0.0, f64::max);
    assert!(ks < 0.04, "ks {ks}");
    Ok(())
  }

  #[test]
  fn resets_pull_long_run_toward_initial_value() -> Result<()> {
    let drifting = SimulationConfig::basic(2000, 0.0, 1.0, 1.0, DT);
    let with_resets = drifting.clone().with_death_rate(0.5);

    let (free_mean, _) = mean_and_variance(&sample_long_run_par(&drifting, 500, 5)?);
    let (reset_mean, _) = mean_and_variance(&sample_long_run_par(&with_resets, 500, 5)?);

    assert!(reset_mean < free_mean / 10.0, "{reset_mean} vs {free_mean}");
    Ok(())
  }
}
