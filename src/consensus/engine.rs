//! Consensus engine.
//!
//! Runs the per-role voting rules over the currently active agent set and
//! aggregates into an approve/reject outcome under a risk-tiered
//! approval threshold.

use crate::consensus::roster::Agent;
use crate::consensus::rules::{RoleRules, VotePolicy};
use crate::core::{round2, validate, Error, Result};
use crate::ledger::{TxStatus, VoteDecision};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Amounts below this floor skip voting entirely.
pub const AUTO_APPROVE_FLOOR: f64 = 100.0;

/// Required approval rate for a transaction amount.
///
/// Tiers are strict at the boundaries: exactly 100.00 votes at the 2/3
/// tier and exactly 1000.00 stays there; only above 1000 does the
/// supermajority apply.
pub fn required_threshold(amount: f64) -> f64 {
    if amount < AUTO_APPROVE_FLOOR {
        0.0
    } else if amount <= 1000.0 {
        0.67
    } else {
        0.80
    }
}

/// One agent's vote with a human-readable justification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentVote {
    /// Voting agent
    pub agent_id: String,
    /// The decision
    pub decision: VoteDecision,
    /// Justification for the decision
    pub reason: String,
}

/// Result of a consensus vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    /// Derived transaction id
    pub transaction_id: String,
    /// Final status
    pub status: TxStatus,
    /// Individual votes
    pub votes: Vec<AgentVote>,
    /// Fraction of agents that approved, rounded to 2 decimal places
    pub approval_rate: f64,
    /// Minimum rate that was required
    pub required_threshold: f64,
}

impl ConsensusOutcome {
    /// Number of approving votes.
    pub fn approve_count(&self) -> usize {
        self.votes
            .iter()
            .filter(|v| v.decision == VoteDecision::Approve)
            .count()
    }
}

/// Engine simulating multi-agent consensus voting on transactions.
pub struct ConsensusEngine {
    policy: Arc<dyn VotePolicy>,
}

impl ConsensusEngine {
    /// Create an engine with an injected voting policy.
    pub fn new(policy: Arc<dyn VotePolicy>) -> Self {
        Self { policy }
    }

    /// Create an engine with the fixed per-role rules.
    pub fn with_default_rules() -> Self {
        Self::new(Arc::new(RoleRules))
    }

    /// Simulate a vote over the provided active agent subset.
    ///
    /// The subset is a parameter — the engine holds no roster state of
    /// its own, so concurrent transactions with different active sets
    /// cannot interfere. An empty subset is a `NoQuorum` error, never a
    /// vacuous 0/0 approval.
    pub fn vote(&self, active: &[Agent], amount: f64, merchant: &str) -> Result<ConsensusOutcome> {
        validate::amount(amount)?;
        let merchant = validate::merchant(merchant)?;

        if active.is_empty() {
            return Err(Error::NoQuorum);
        }

        let votes: Vec<AgentVote> = active
            .iter()
            .map(|agent| AgentVote {
                agent_id: agent.id.clone(),
                decision: self.policy.decide(agent.role, amount, &merchant),
                reason: format!("Evaluated amount ${amount:.2} for merchant {merchant}"),
            })
            .collect();

        // Review and reject both count as non-approval.
        let approve_count = votes
            .iter()
            .filter(|v| v.decision == VoteDecision::Approve)
            .count();
        let approval_rate = approve_count as f64 / votes.len() as f64;
        let threshold = required_threshold(amount);

        // Round both sides identically so 2-of-3 (0.6666...) passes 0.67.
        let status = if round2(approval_rate) >= round2(threshold) {
            TxStatus::Approved
        } else {
            TxStatus::Rejected
        };

        Ok(ConsensusOutcome {
            transaction_id: format!("tx_{}", uuid::Uuid::new_v4().simple()),
            status,
            votes,
            approval_rate: round2(approval_rate),
            required_threshold: threshold,
        })
    }
}

impl Default for ConsensusEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::roster::Roster;

    fn standard_agents() -> Vec<Agent> {
        Roster::standard().agents().to_vec()
    }

    #[test]
    fn test_two_of_three_passes_67_percent() {
        // 750: finance approves, compliance approves (known merchant),
        // audit reviews (> 500). 2/3 = 0.6667 -> rounds to 0.67.
        let engine = ConsensusEngine::default();
        let outcome = engine.vote(&standard_agents(), 750.0, "amazon").unwrap();

        assert_eq!(outcome.approve_count(), 2);
        assert_eq!(outcome.approval_rate, 0.67);
        assert_eq!(outcome.required_threshold, 0.67);
        assert_eq!(outcome.status, TxStatus::Approved);
    }

    #[test]
    fn test_review_counts_as_non_approval() {
        // 2000 at an unknown merchant: finance approves, compliance
        // reviews, audit reviews. 1/3 against the 0.80 tier.
        let engine = ConsensusEngine::default();
        let outcome = engine.vote(&standard_agents(), 2000.0, "shady-store").unwrap();

        assert_eq!(outcome.approve_count(), 1);
        assert_eq!(outcome.status, TxStatus::Rejected);
    }

    #[test]
    fn test_tier_boundaries_strict() {
        assert_eq!(required_threshold(99.99), 0.0);
        assert_eq!(required_threshold(100.0), 0.67);
        assert_eq!(required_threshold(100.01), 0.67);
        assert_eq!(required_threshold(1000.0), 0.67);
        assert_eq!(required_threshold(1000.01), 0.8);
    }

    #[test]
    fn test_supermajority_tier() {
        // 1500 at a known merchant: finance approves, compliance
        // approves, audit reviews. 0.67 < 0.80 -> rejected.
        let engine = ConsensusEngine::default();
        let outcome = engine.vote(&standard_agents(), 1500.0, "amazon").unwrap();

        assert_eq!(outcome.required_threshold, 0.8);
        assert_eq!(outcome.status, TxStatus::Rejected);
    }

    #[test]
    fn test_empty_active_set_is_no_quorum() {
        let engine = ConsensusEngine::default();
        let result = engine.vote(&[], 250.0, "amazon");
        assert!(matches!(result, Err(Error::NoQuorum)));
    }

    #[test]
    fn test_unique_transaction_ids() {
        let engine = ConsensusEngine::default();
        let a = engine.vote(&standard_agents(), 250.0, "amazon").unwrap();
        let b = engine.vote(&standard_agents(), 250.0, "amazon").unwrap();
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[test]
    fn test_validation_before_voting() {
        let engine = ConsensusEngine::default();
        assert!(engine.vote(&standard_agents(), -5.0, "amazon").is_err());
        assert!(engine.vote(&standard_agents(), 250.0, "  ").is_err());
    }

    #[test]
    fn test_votes_carry_justifications() {
        let engine = ConsensusEngine::default();
        let outcome = engine.vote(&standard_agents(), 250.0, "amazon").unwrap();
        for vote in &outcome.votes {
            assert!(vote.reason.contains("250.00"));
            assert!(vote.reason.contains("amazon"));
        }
    }
}
