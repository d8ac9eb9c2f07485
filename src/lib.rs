//! # VIGIL - Vote Integrity Gating for Intelligent Ledgers
//!
//! A transaction-approval simulator with adaptive agent trust monitoring:
//! - **Ledger**: durable keyed records of votes, revocations, and outcomes
//! - **Baseline**: EWMA expected-amount baselines per agent
//! - **Integrity**: dual-signal compromise detection (drift x fingerprint)
//! - **Consensus**: role-keyed rule voting with risk-tiered thresholds
//! - **Revocation**: the state machine gating which agents may vote
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vigil::consensus::Roster;
//! use vigil::integrity::ModelRegistry;
//! use vigil::ledger::MemoryLedger;
//! use vigil::revocation::RevocationController;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ledger = Arc::new(MemoryLedger::new());
//!     let registry = Arc::new(ModelRegistry::new());
//!     let controller =
//!         RevocationController::with_registry(Roster::standard(), ledger, registry);
//!
//!     let report = controller.execute(250.0, "amazon").await.unwrap();
//!     println!("blocked: {}", report.is_blocked());
//! }
//! ```

pub mod baseline;
pub mod consensus;
pub mod core;
pub mod fraud;
pub mod integrity;
pub mod issuance;
pub mod ledger;
pub mod revocation;

pub use crate::core::error::{Error, Result};

/// Install a `tracing` subscriber honoring `RUST_LOG`. Call once at
/// process start; later calls are ignored.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
