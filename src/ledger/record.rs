//! Ledger record structures.
//!
//! Backend-agnostic rows for vote history, revocation status,
//! transaction outcomes, and issued mandates.

use crate::core::{now, Timestamp};
use serde::{Deserialize, Serialize};

/// An agent's decision on a single transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDecision {
    /// Approve the transaction
    Approve,
    /// Reject the transaction
    Reject,
    /// Escalate for human review
    Review,
}

impl std::fmt::Display for VoteDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteDecision::Approve => write!(f, "approve"),
            VoteDecision::Reject => write!(f, "reject"),
            VoteDecision::Review => write!(f, "review"),
        }
    }
}

/// One agent's vote on one transaction.
///
/// Composite-unique on (agent_id, transaction_id); a later write for the
/// same pair replaces the earlier one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Voting agent
    pub agent_id: String,
    /// Transaction voted on
    pub transaction_id: String,
    /// The decision
    pub decision: VoteDecision,
    /// Transaction amount at vote time
    pub amount: f64,
    /// Timestamp
    pub timestamp: Timestamp,
}

impl VoteRecord {
    /// Create a new vote record stamped with the current time.
    pub fn new(agent_id: &str, transaction_id: &str, decision: VoteDecision, amount: f64) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            transaction_id: transaction_id.to_string(),
            decision,
            amount,
            timestamp: now(),
        }
    }
}

/// Current trust status of a revoked agent.
///
/// Existence of a record means the agent is excluded from consensus;
/// reinstatement deletes the record. There is no intermediate state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Revoked agent
    pub agent_id: String,
    /// Why the agent was revoked
    pub reason: String,
    /// When the revocation was committed
    pub revoked_at: Timestamp,
}

impl RevocationRecord {
    /// Create a new revocation record stamped with the current time.
    pub fn new(agent_id: &str, reason: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            reason: reason.to_string(),
            revoked_at: now(),
        }
    }
}

/// Final status of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// Consensus (or auto-approval) passed
    Approved,
    /// Consensus failed
    Rejected,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Approved => write!(f, "approved"),
            TxStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Outcome of one transaction, logged once per transaction id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction id
    pub id: String,
    /// Transaction amount
    pub amount: f64,
    /// Merchant name
    pub merchant: String,
    /// Final status
    pub status: TxStatus,
    /// Required approval rate that was applied
    pub required_threshold: f64,
    /// Timestamp
    pub timestamp: Timestamp,
}

impl TransactionRecord {
    /// Create a new transaction record stamped with the current time.
    pub fn new(
        id: &str,
        amount: f64,
        merchant: &str,
        status: TxStatus,
        required_threshold: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            amount,
            merchant: merchant.to_string(),
            status,
            required_threshold,
            timestamp: now(),
        }
    }
}

/// A merchant-locked spending mandate backing an issued virtual card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MandateRecord {
    /// Unique mandate id
    pub id: String,
    /// Generated virtual card number
    pub card_number: String,
    /// Spending limit
    pub amount: f64,
    /// Merchant the card is locked to
    pub merchant: String,
    /// Timestamp
    pub created_at: Timestamp,
}

impl MandateRecord {
    /// Create a new mandate record stamped with the current time.
    pub fn new(id: &str, card_number: &str, amount: f64, merchant: &str) -> Self {
        Self {
            id: id.to_string(),
            card_number: card_number.to_string(),
            amount,
            merchant: merchant.to_string(),
            created_at: now(),
        }
    }
}
