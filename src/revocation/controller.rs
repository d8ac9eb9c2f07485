//! Revocation controller.
//!
//! Orchestrates one transaction end to end: partitions the roster by
//! revocation status, runs the dual-signal integrity evaluation over the
//! active agents, commits new revocations, and gates the consensus vote
//! on the surviving set.
//!
//! Per-agent state machine: ACTIVE -> (evaluator REVOKE) -> REVOKED ->
//! (explicit reinstate) -> ACTIVE.

use crate::consensus::{Agent, ConsensusEngine, ConsensusOutcome, Roster, AUTO_APPROVE_FLOOR};
use crate::core::{validate, Error, Fingerprint, Result};
use crate::integrity::{
    IntegrityAction, IntegrityAssessment, IntegrityEvaluator, ModelRegistry, TamperSignal,
};
use crate::ledger::{
    LedgerStore, RevocationRecord, TransactionRecord, TxStatus, VoteRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Why an agent sat out a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Revoked before this transaction began
    PreviouslyRevoked,
    /// Revoked during this transaction's integrity sweep
    Revoked {
        /// The reason written to the ledger
        reason: String,
    },
}

/// An agent excluded from a transaction's vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExcludedAgent {
    /// Agent id
    pub agent_id: String,
    /// Why it was excluded
    pub exclusion: ExclusionReason,
}

/// An agent kept voting but flagged for human review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoldAlert {
    /// Agent id
    pub agent_id: String,
    /// Observed drift from baseline
    pub drift: f64,
    /// Baseline the drift was measured against
    pub baseline: f64,
}

/// How a transaction was resolved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TransactionResolution {
    /// Below the voting floor; approved without a vote
    AutoApproved {
        /// Derived transaction id
        transaction_id: String,
    },
    /// A consensus vote ran over the surviving active set
    Voted(ConsensusOutcome),
    /// Exclusion emptied the roster; no vote was possible
    Blocked,
}

/// Full report for one transaction evaluation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionReport {
    /// Amount evaluated
    pub amount: f64,
    /// Merchant evaluated
    pub merchant: String,
    /// The resolution
    pub resolution: TransactionResolution,
    /// Agents excluded from the vote
    pub excluded: Vec<ExcludedAgent>,
    /// Agents that voted under a hold annotation
    pub holds: Vec<HoldAlert>,
}

impl TransactionReport {
    /// Whether the transaction was blocked for lack of quorum.
    pub fn is_blocked(&self) -> bool {
        matches!(self.resolution, TransactionResolution::Blocked)
    }
}

/// Orchestrates integrity evaluation and consensus gating per transaction.
pub struct RevocationController {
    roster: Roster,
    store: Arc<dyn LedgerStore>,
    tamper: Arc<dyn TamperSignal>,
    evaluator: IntegrityEvaluator,
    engine: ConsensusEngine,
    /// Model fingerprints pinned at registration time
    pinned: HashMap<String, Fingerprint>,
}

impl RevocationController {
    /// Create a controller with explicit pinned fingerprints.
    pub fn new(
        roster: Roster,
        store: Arc<dyn LedgerStore>,
        tamper: Arc<dyn TamperSignal>,
        pinned: HashMap<String, Fingerprint>,
    ) -> Self {
        Self {
            roster,
            store,
            tamper,
            evaluator: IntegrityEvaluator::default(),
            engine: ConsensusEngine::with_default_rules(),
            pinned,
        }
    }

    /// Create a controller that pins each roster agent's current
    /// fingerprint from the registry.
    pub fn with_registry(
        roster: Roster,
        store: Arc<dyn LedgerStore>,
        registry: Arc<ModelRegistry>,
    ) -> Self {
        let pinned = roster
            .agents()
            .iter()
            .map(|a| (a.id.clone(), registry.current_fingerprint(&a.id)))
            .collect();
        Self::new(roster, store, registry, pinned)
    }

    /// The configured roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Evaluate one transaction end to end.
    pub async fn execute(&self, amount: f64, merchant: &str) -> Result<TransactionReport> {
        validate::amount(amount)?;
        let merchant = validate::merchant(merchant)?;

        // Trivial amounts bypass both the integrity sweep and the vote.
        if amount < AUTO_APPROVE_FLOOR {
            let transaction_id = format!("tx_{}", uuid::Uuid::new_v4().simple());
            self.store
                .record_transaction(TransactionRecord::new(
                    &transaction_id,
                    amount,
                    &merchant,
                    TxStatus::Approved,
                    0.0,
                ))
                .await?;
            info!(
                transaction_id = %transaction_id,
                amount,
                merchant = %merchant,
                "auto-approved below voting floor"
            );
            return Ok(TransactionReport {
                amount,
                merchant,
                resolution: TransactionResolution::AutoApproved { transaction_id },
                excluded: Vec::new(),
                holds: Vec::new(),
            });
        }

        let mut excluded = Vec::new();
        let mut holds = Vec::new();
        let mut active: Vec<Agent> = Vec::new();

        for agent in self.roster.agents() {
            if self.store.is_revoked(&agent.id).await? {
                excluded.push(ExcludedAgent {
                    agent_id: agent.id.clone(),
                    exclusion: ExclusionReason::PreviouslyRevoked,
                });
                continue;
            }

            let assessment = self.assess_agent(&agent.id, amount).await?;
            match assessment.action {
                IntegrityAction::Revoke => {
                    let reason = format!(
                        "Dual-signal compromise: drift {:.2} exceeds half of baseline {:.2} with model fingerprint mismatch",
                        assessment.drift, assessment.baseline.ewma
                    );
                    self.store.revoke(&agent.id, &reason).await?;
                    warn!(agent_id = %agent.id, drift = assessment.drift, "agent revoked");
                    excluded.push(ExcludedAgent {
                        agent_id: agent.id.clone(),
                        exclusion: ExclusionReason::Revoked { reason },
                    });
                }
                IntegrityAction::HoldAlert => {
                    warn!(agent_id = %agent.id, drift = assessment.drift, "agent held for review");
                    holds.push(HoldAlert {
                        agent_id: agent.id.clone(),
                        drift: assessment.drift,
                        baseline: assessment.baseline.ewma,
                    });
                    active.push(agent.clone());
                }
                IntegrityAction::Ignore | IntegrityAction::Approve => {
                    active.push(agent.clone());
                }
            }
        }

        if active.is_empty() {
            warn!(amount, merchant = %merchant, "transaction blocked: exclusion emptied the roster");
            return Ok(TransactionReport {
                amount,
                merchant,
                resolution: TransactionResolution::Blocked,
                excluded,
                holds,
            });
        }

        let outcome = self.engine.vote(&active, amount, &merchant)?;

        for vote in &outcome.votes {
            self.store
                .record_vote(VoteRecord::new(
                    &vote.agent_id,
                    &outcome.transaction_id,
                    vote.decision,
                    amount,
                ))
                .await?;
        }
        self.store
            .record_transaction(TransactionRecord::new(
                &outcome.transaction_id,
                amount,
                &merchant,
                outcome.status,
                outcome.required_threshold,
            ))
            .await?;

        info!(
            transaction_id = %outcome.transaction_id,
            status = %outcome.status,
            approval_rate = outcome.approval_rate,
            "consensus complete"
        );

        Ok(TransactionReport {
            amount,
            merchant,
            resolution: TransactionResolution::Voted(outcome),
            excluded,
            holds,
        })
    }

    /// Run the integrity evaluation for one agent against an amount.
    pub async fn assess_agent(&self, agent_id: &str, amount: f64) -> Result<IntegrityAssessment> {
        let pinned = self
            .pinned
            .get(agent_id)
            .ok_or_else(|| Error::AgentNotRegistered(agent_id.to_string()))?;
        let tampered = self.tamper.hash_tampered(agent_id, pinned);
        self.evaluator
            .evaluate(self.store.as_ref(), agent_id, amount, tampered)
            .await
    }

    /// Manually revoke an agent.
    pub async fn revoke(&self, agent_id: &str, reason: &str) -> Result<()> {
        validate::agent_id(agent_id)?;
        self.store.revoke(agent_id, reason).await?;
        warn!(agent_id, reason, "agent manually revoked");
        Ok(())
    }

    /// Reinstate an agent unconditionally. A no-op for active agents;
    /// any audit gate belongs to the caller.
    pub async fn reinstate(&self, agent_id: &str) -> Result<()> {
        validate::agent_id(agent_id)?;
        self.store.reinstate(agent_id).await?;
        info!(agent_id, "agent reinstated");
        Ok(())
    }

    /// Whether an agent is currently revoked.
    pub async fn is_revoked(&self, agent_id: &str) -> Result<bool> {
        validate::agent_id(agent_id)?;
        self.store.is_revoked(agent_id).await
    }

    /// All currently revoked agents.
    pub async fn list_revoked(&self) -> Result<Vec<RevocationRecord>> {
        self.store.list_revoked().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{MemoryLedger, VoteDecision};

    /// Controller over the standard roster with a seeded baseline of
    /// `history` for every agent.
    async fn seeded_controller(
        history: &[f64],
    ) -> (RevocationController, Arc<MemoryLedger>, Arc<ModelRegistry>) {
        let ledger = Arc::new(MemoryLedger::new());
        let registry = Arc::new(ModelRegistry::new());
        let roster = Roster::standard();

        for agent in roster.agents() {
            for (i, amount) in history.iter().enumerate() {
                ledger
                    .record_vote(VoteRecord::new(
                        &agent.id,
                        &format!("seed-{}-{i}", agent.id),
                        VoteDecision::Approve,
                        *amount,
                    ))
                    .await
                    .unwrap();
            }
        }

        let controller = RevocationController::with_registry(
            roster,
            ledger.clone(),
            registry.clone(),
        );
        (controller, ledger, registry)
    }

    #[tokio::test]
    async fn test_auto_approve_below_floor() {
        let (controller, ledger, _) = seeded_controller(&[]).await;
        let report = controller.execute(99.99, "amazon").await.unwrap();

        match &report.resolution {
            TransactionResolution::AutoApproved { transaction_id } => {
                let tx = ledger.transaction(transaction_id).unwrap();
                assert_eq!(tx.status, TxStatus::Approved);
                assert_eq!(tx.required_threshold, 0.0);
            }
            other => panic!("expected auto-approval, got {other:?}"),
        }
        // No vote ran below the floor.
        assert_eq!(ledger.vote_count(), 0);
    }

    #[tokio::test]
    async fn test_amount_at_floor_goes_to_vote() {
        let (controller, _, _) = seeded_controller(&[100.0, 100.0, 100.0]).await;
        let report = controller.execute(100.0, "amazon").await.unwrap();
        assert!(matches!(report.resolution, TransactionResolution::Voted(_)));
    }

    #[tokio::test]
    async fn test_compromised_agent_excluded_and_vote_proceeds() {
        let (controller, ledger, registry) = seeded_controller(&[100.0, 100.0, 100.0]).await;

        // The audit agent's model is swapped out from under it.
        registry.set_version("audit_agent", "model-v9.9-rogue");

        // 250 drifts 150 beyond every agent's baseline of 100: anomaly
        // everywhere, but only the audit agent corroborates via tamper.
        let report = controller.execute(250.0, "amazon").await.unwrap();

        assert_eq!(report.excluded.len(), 1);
        assert_eq!(report.excluded[0].agent_id, "audit_agent");
        assert!(matches!(
            report.excluded[0].exclusion,
            ExclusionReason::Revoked { .. }
        ));
        assert!(ledger.is_revoked("audit_agent").await.unwrap());

        // The two drifted-but-untampered agents vote under hold alerts.
        assert_eq!(report.holds.len(), 2);

        match &report.resolution {
            TransactionResolution::Voted(outcome) => {
                assert_eq!(outcome.votes.len(), 2);
                assert_eq!(outcome.status, TxStatus::Approved);
            }
            other => panic!("expected a vote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_excluded_blocks_transaction() {
        let (controller, ledger, _) = seeded_controller(&[]).await;
        for agent in controller.roster().agents() {
            controller.revoke(&agent.id, "operator lockdown").await.unwrap();
        }

        let report = controller.execute(250.0, "amazon").await.unwrap();

        assert!(report.is_blocked());
        assert_eq!(report.excluded.len(), 3);
        for excluded in &report.excluded {
            assert_eq!(excluded.exclusion, ExclusionReason::PreviouslyRevoked);
        }
        // Blocked is distinct from rejected: nothing was logged as voted.
        assert_eq!(ledger.transaction_count(), 0);
        assert_eq!(ledger.vote_count(), 0);
    }

    #[tokio::test]
    async fn test_votes_and_outcome_appended() {
        let (controller, ledger, _) = seeded_controller(&[240.0, 260.0, 250.0]).await;
        let report = controller.execute(250.0, "amazon").await.unwrap();

        let outcome = match &report.resolution {
            TransactionResolution::Voted(outcome) => outcome,
            other => panic!("expected a vote, got {other:?}"),
        };

        // 3 seed votes per agent plus one live vote per agent.
        assert_eq!(ledger.vote_count(), 12);
        let tx = ledger.transaction(&outcome.transaction_id).unwrap();
        assert_eq!(tx.required_threshold, 0.67);
        assert_eq!(tx.status, outcome.status);
    }

    #[tokio::test]
    async fn test_reinstate_returns_agent_to_voting() {
        let (controller, _, _) = seeded_controller(&[100.0]).await;
        controller.revoke("finance_agent", "operator hold").await.unwrap();
        assert!(controller.is_revoked("finance_agent").await.unwrap());

        controller.reinstate("finance_agent").await.unwrap();
        assert!(!controller.is_revoked("finance_agent").await.unwrap());

        let report = controller.execute(100.0, "amazon").await.unwrap();
        assert!(report.excluded.is_empty());
    }

    #[tokio::test]
    async fn test_reinstate_active_agent_is_noop() {
        let (controller, _, _) = seeded_controller(&[]).await;
        controller.reinstate("finance_agent").await.unwrap();
        assert!(!controller.is_revoked("finance_agent").await.unwrap());
    }

    #[tokio::test]
    async fn test_revoked_agent_does_not_vote() {
        let (controller, _, _) = seeded_controller(&[100.0, 100.0]).await;
        controller.revoke("audit_agent", "operator hold").await.unwrap();

        let report = controller.execute(100.0, "amazon").await.unwrap();

        match &report.resolution {
            TransactionResolution::Voted(outcome) => {
                assert_eq!(outcome.votes.len(), 2);
                assert!(outcome.votes.iter().all(|v| v.agent_id != "audit_agent"));
            }
            other => panic!("expected a vote, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_rejected_before_any_write() {
        let (controller, ledger, _) = seeded_controller(&[]).await;
        assert!(controller.execute(-10.0, "amazon").await.is_err());
        assert!(controller.execute(250.0, "   ").await.is_err());
        assert_eq!(ledger.transaction_count(), 0);
        assert_eq!(ledger.vote_count(), 0);
    }

    #[tokio::test]
    async fn test_no_history_tampered_agent_still_votes() {
        // Fresh agents have no baseline; a lone fingerprint mismatch is
        // low-confidence and must not exclude anyone.
        let (controller, _, registry) = seeded_controller(&[]).await;
        registry.set_version("finance_agent", "model-v2.0");

        let report = controller.execute(500.0, "amazon").await.unwrap();
        assert!(report.excluded.is_empty());
        match &report.resolution {
            TransactionResolution::Voted(outcome) => assert_eq!(outcome.votes.len(), 3),
            other => panic!("expected a vote, got {other:?}"),
        }
    }
}
