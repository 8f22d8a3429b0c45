//! # Process
//!
//! $$
//! X_{k+1}=X_k+\mu_{z(X_k)}\Delta t+\sigma_{z(X_k)}^2\varepsilon_k\Delta t
//! $$
//!
pub mod switching;
