//! # regime-bm
//!
//! $$
//! X_{k+1}=\begin{cases}x_0 & U_k<\lambda\Delta t\\ X_k+\mu_{z_k}\Delta t+\sigma_{z_k}^2\varepsilon_k\Delta t & \text{otherwise}\end{cases}
//! $$
//!
//! Discretized Brownian motion with two-regime drift/volatility switching and
//! stochastic resets ("deaths") to the initial value, simulated across many
//! independent paths at once.
//!
//! | Module          | Description                                                             |
//! |-----------------|-------------------------------------------------------------------------|
//! | [`stochastic`]  | Configuration, regime classifier, step noise, engine and long-run sampling. |
//! | [`random`]      | Injectable random sources (seeded, thread-local, constant, replay).     |
//! | [`traits`]      | `FloatExt` numeric bound and the `ProcessExt` sampling contract.        |
//! | [`error`]       | `SimulationError` and the crate `Result` alias.                         |
//!
//! ## Example
//!
//! ```rust
//! use regime_bm::random::SeededSource;
//! use regime_bm::stochastic::config::SimulationConfig;
//! use regime_bm::stochastic::process::switching::RegimeSwitchingBm;
//!
//! let config = SimulationConfig::<f64>::double_switch(1000, 0.0, [0.0, -0.1], [1.0, 1.2], [-1.0, -2.0], 0.1)
//!   .with_paths(100)
//!   .with_death_rate(0.05);
//! let paths = RegimeSwitchingBm::new(config).simulate(&mut SeededSource::from_seed(42))?;
//! assert_eq!(paths.values.dim(), (100, 1000));
//! ```

pub mod error;
pub mod random;
pub mod stochastic;
pub mod traits;

pub use error::Result;
pub use error::SimulationError;
