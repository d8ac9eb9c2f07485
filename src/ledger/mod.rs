//! Ledger Module
//!
//! Durable keyed records backing the trust monitor:
//! - Per-agent vote history (composite-unique, overwrite on retry)
//! - Revocation status (present = revoked)
//! - Transaction outcomes and issued mandates

pub mod memory;
pub mod record;
pub mod store;

pub use memory::MemoryLedger;
pub use record::{
    MandateRecord, RevocationRecord, TransactionRecord, TxStatus, VoteDecision, VoteRecord,
};
pub use store::{LedgerStore, DEFAULT_HISTORY_LIMIT};
