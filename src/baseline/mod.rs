//! Baseline Module
//!
//! Adaptive per-agent expected-amount baselines derived from vote history.

pub mod estimator;

pub use estimator::{Baseline, BaselineEstimator, DEFAULT_DECAY};
