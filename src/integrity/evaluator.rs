//! Dual-signal integrity evaluation.
//!
//! Combines behavioral drift against an adaptive baseline with a
//! model-fingerprint tamper signal. Only corroborated evidence triggers
//! automatic revocation; a lone behavioral signal routes to human review
//! and a lone fingerprint mismatch is treated as a possible legitimate
//! model update.

use crate::baseline::{Baseline, BaselineEstimator};
use crate::core::Result;
use crate::ledger::LedgerStore;
use serde::{Deserialize, Serialize};

/// Window of recent approved amounts the evaluator feeds the estimator.
pub const EVALUATION_WINDOW: usize = 50;

/// Drift beyond this fraction of the baseline counts as anomalous.
pub const DRIFT_RATIO: f64 = 0.5;

/// Action resulting from an integrity evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityAction {
    /// Both signals confirm compromise; revoke automatically
    Revoke,
    /// Behavioral drift alone; hold for human review
    HoldAlert,
    /// Fingerprint mismatch alone; could be a legitimate model update
    Ignore,
    /// Neither signal fired
    Approve,
}

impl std::fmt::Display for IntegrityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityAction::Revoke => write!(f, "REVOKE"),
            IntegrityAction::HoldAlert => write!(f, "HOLD_ALERT"),
            IntegrityAction::Ignore => write!(f, "IGNORE"),
            IntegrityAction::Approve => write!(f, "APPROVE"),
        }
    }
}

/// How confident the evaluator is in its action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "HIGH"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::Low => write!(f, "LOW"),
        }
    }
}

/// Full result of evaluating one agent against one transaction amount.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegrityAssessment {
    /// Resulting action
    pub action: IntegrityAction,
    /// Confidence in the action
    pub confidence: Confidence,
    /// Baseline the drift was measured against
    pub baseline: Baseline,
    /// Absolute difference between amount and baseline
    pub drift: f64,
    /// Whether drift exceeded the anomaly threshold
    pub behavioral_anomaly: bool,
    /// Whether the model fingerprint mismatched
    pub hash_tampered: bool,
}

/// Dual-signal integrity evaluator.
///
/// Pure: a function of the agent's vote history, the current amount, and
/// the externally supplied tamper flag. Performs no writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegrityEvaluator {
    estimator: BaselineEstimator,
}

impl IntegrityEvaluator {
    /// Create an evaluator around a baseline estimator.
    pub fn new(estimator: BaselineEstimator) -> Self {
        Self { estimator }
    }

    /// Classify from an explicit history slice (most recent first).
    pub fn assess(&self, history: &[f64], amount: f64, hash_tampered: bool) -> IntegrityAssessment {
        let baseline = self.estimator.estimate(history);
        let drift = (amount - baseline.ewma).abs();

        // A zero baseline means insufficient history, not an expected
        // amount of zero; no anomaly can be declared from it.
        let behavioral_anomaly = baseline.ewma > 0.0 && drift > DRIFT_RATIO * baseline.ewma;

        let (action, confidence) = match (behavioral_anomaly, hash_tampered) {
            (true, true) => (IntegrityAction::Revoke, Confidence::High),
            (true, false) => (IntegrityAction::HoldAlert, Confidence::Medium),
            (false, true) => (IntegrityAction::Ignore, Confidence::Low),
            (false, false) => (IntegrityAction::Approve, Confidence::High),
        };

        IntegrityAssessment {
            action,
            confidence,
            baseline,
            drift,
            behavioral_anomaly,
            hash_tampered,
        }
    }

    /// Classify an agent using its recent approval history from the store.
    pub async fn evaluate(
        &self,
        store: &dyn LedgerStore,
        agent_id: &str,
        amount: f64,
        hash_tampered: bool,
    ) -> Result<IntegrityAssessment> {
        let history = store.approved_amounts(agent_id, EVALUATION_WINDOW).await?;
        Ok(self.assess(&history, amount, hash_tampered))
    }
}
