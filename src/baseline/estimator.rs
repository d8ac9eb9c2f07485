//! Exponentially weighted moving average baseline.
//!
//! Weights recent approvals more heavily than older ones, so the baseline
//! tracks legitimate gradual behavioral evolution without being told to.
//! A static mean ± sigma band misclassifies that same evolution as
//! anomalous at a rate that scales with how far behavior has shifted
//! since the band was computed.

use crate::core::validate;
use crate::core::{round2, Result};
use serde::{Deserialize, Serialize};

/// Default decay factor. Higher values weight recent data more.
pub const DEFAULT_DECAY: f64 = 0.9;

/// An agent's expected-amount baseline.
///
/// `sample_count == 0` means insufficient history: the zero baseline must
/// be read as "no anomaly possible", never as "expected amount is zero".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Weighted average of recent approved amounts
    pub ewma: f64,
    /// Number of samples the average covers
    pub sample_count: usize,
}

impl Baseline {
    /// The empty-history baseline.
    pub fn empty() -> Self {
        Self {
            ewma: 0.0,
            sample_count: 0,
        }
    }

    /// Whether enough history exists for anomaly judgments.
    pub fn has_history(&self) -> bool {
        self.sample_count > 0
    }
}

/// EWMA baseline estimator over a most-recent-first amount sequence.
#[derive(Clone, Copy, Debug)]
pub struct BaselineEstimator {
    decay: f64,
}

impl BaselineEstimator {
    /// Create an estimator with the given decay factor in (0, 1).
    pub fn new(decay: f64) -> Result<Self> {
        validate::decay(decay)?;
        Ok(Self { decay })
    }

    /// The configured decay factor.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Compute the baseline over amounts ordered most recent first.
    ///
    /// The i-th most recent sample gets weight `decay^i` (i = 0 for the
    /// newest); baseline = Σ(amount·weight) / Σ(weight).
    pub fn estimate(&self, amounts: &[f64]) -> Baseline {
        if amounts.is_empty() {
            return Baseline::empty();
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut weight = 1.0;

        for amount in amounts {
            weighted_sum += amount * weight;
            weight_total += weight;
            weight *= self.decay;
        }

        Baseline {
            ewma: round2(weighted_sum / weight_total),
            sample_count: amounts.len(),
        }
    }
}

impl Default for BaselineEstimator {
    fn default() -> Self {
        Self { decay: DEFAULT_DECAY }
    }
}
