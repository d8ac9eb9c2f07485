//! In-memory ledger backend.
//!
//! One lock per table; every operation is a single bounded critical
//! section, so concurrent readers never observe a half-written row.

use crate::core::Result;
use crate::ledger::record::{
    MandateRecord, RevocationRecord, TransactionRecord, VoteDecision, VoteRecord,
};
use crate::ledger::store::LedgerStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// In-memory ledger over per-table `RwLock` maps.
///
/// The write sequence number orders votes for most-recent-first retrieval;
/// an overwrite re-sequences the row, matching timestamp-descending order
/// in a SQL backend.
#[derive(Default)]
pub struct MemoryLedger {
    /// Vote history keyed by (agent_id, transaction_id)
    votes: RwLock<HashMap<(String, String), (u64, VoteRecord)>>,
    /// Revocation status keyed by agent_id
    revocations: RwLock<HashMap<String, RevocationRecord>>,
    /// Transaction outcomes keyed by transaction id
    transactions: RwLock<HashMap<String, TransactionRecord>>,
    /// Issued mandates keyed by mandate id
    mandates: RwLock<HashMap<String, MandateRecord>>,
    /// Monotonic write sequence
    seq: AtomicU64,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored votes.
    pub fn vote_count(&self) -> usize {
        self.votes.read().unwrap().len()
    }

    /// Number of logged transactions.
    pub fn transaction_count(&self) -> usize {
        self.transactions.read().unwrap().len()
    }

    /// Look up a logged transaction.
    pub fn transaction(&self, tx_id: &str) -> Option<TransactionRecord> {
        self.transactions.read().unwrap().get(tx_id).cloned()
    }

    /// Look up an issued mandate.
    pub fn mandate(&self, mandate_id: &str) -> Option<MandateRecord> {
        self.mandates.read().unwrap().get(mandate_id).cloned()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn record_vote(&self, vote: VoteRecord) -> Result<()> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let key = (vote.agent_id.clone(), vote.transaction_id.clone());
        let mut votes = self.votes.write().unwrap();
        votes.insert(key, (seq, vote));
        Ok(())
    }

    async fn approved_amounts(&self, agent_id: &str, limit: usize) -> Result<Vec<f64>> {
        let votes = self.votes.read().unwrap();
        let mut approved: Vec<(u64, f64)> = votes
            .values()
            .filter(|(_, v)| v.agent_id == agent_id && v.decision == VoteDecision::Approve)
            .map(|(seq, v)| (*seq, v.amount))
            .collect();
        approved.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(approved.into_iter().take(limit).map(|(_, a)| a).collect())
    }

    async fn revoke(&self, agent_id: &str, reason: &str) -> Result<()> {
        let record = RevocationRecord::new(agent_id, reason);
        let mut revocations = self.revocations.write().unwrap();
        revocations.insert(agent_id.to_string(), record);
        Ok(())
    }

    async fn reinstate(&self, agent_id: &str) -> Result<()> {
        let mut revocations = self.revocations.write().unwrap();
        revocations.remove(agent_id);
        Ok(())
    }

    async fn is_revoked(&self, agent_id: &str) -> Result<bool> {
        let revocations = self.revocations.read().unwrap();
        Ok(revocations.contains_key(agent_id))
    }

    async fn list_revoked(&self) -> Result<Vec<RevocationRecord>> {
        let revocations = self.revocations.read().unwrap();
        let mut records: Vec<RevocationRecord> = revocations.values().cloned().collect();
        records.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        Ok(records)
    }

    async fn record_transaction(&self, tx: TransactionRecord) -> Result<()> {
        let mut transactions = self.transactions.write().unwrap();
        transactions.insert(tx.id.clone(), tx);
        Ok(())
    }

    async fn record_mandate(&self, mandate: MandateRecord) -> Result<()> {
        let mut mandates = self.mandates.write().unwrap();
        mandates.insert(mandate.id.clone(), mandate);
        Ok(())
    }
}
