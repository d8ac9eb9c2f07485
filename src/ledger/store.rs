//! LedgerStore trait definition.
//!
//! Core trait that all ledger backends must implement.

use crate::core::Result;
use crate::ledger::record::{MandateRecord, RevocationRecord, TransactionRecord, VoteRecord};
use async_trait::async_trait;

/// Default bound on how much vote history a baseline query returns.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Core trait for ledger backends.
///
/// All storage implementations must implement this trait; components take
/// a store handle explicitly so tests can supply isolated stores.
///
/// Contract: every operation is a single all-or-nothing write or read.
/// A failed write leaves the store as if the operation never ran — partial
/// commits are not permitted. Retrying `record_vote` for the same
/// (agent, transaction) pair overwrites rather than duplicates.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Append an agent's vote. Last write wins for a given
    /// (agent_id, transaction_id) pair.
    async fn record_vote(&self, vote: VoteRecord) -> Result<()>;

    /// Amounts this agent voted to approve, most recent first,
    /// bounded by `limit`.
    async fn approved_amounts(&self, agent_id: &str, limit: usize) -> Result<Vec<f64>>;

    /// Amounts this agent voted to approve under the default history bound.
    async fn recent_approved_amounts(&self, agent_id: &str) -> Result<Vec<f64>> {
        self.approved_amounts(agent_id, DEFAULT_HISTORY_LIMIT).await
    }

    /// Mark an agent revoked. Re-revoking overwrites the reason without
    /// duplicating records.
    async fn revoke(&self, agent_id: &str, reason: &str) -> Result<()>;

    /// Remove an agent's revocation. A no-op if the agent is active.
    async fn reinstate(&self, agent_id: &str) -> Result<()>;

    /// Whether the agent is currently revoked.
    async fn is_revoked(&self, agent_id: &str) -> Result<bool>;

    /// All currently revoked agents.
    async fn list_revoked(&self) -> Result<Vec<RevocationRecord>>;

    /// Log a transaction outcome.
    async fn record_transaction(&self, tx: TransactionRecord) -> Result<()>;

    /// Log an issued mandate.
    async fn record_mandate(&self, mandate: MandateRecord) -> Result<()>;

    /// Health check for the backend.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
