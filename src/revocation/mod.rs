//! Revocation Module
//!
//! Per-transaction orchestration: integrity sweep, revocation commits,
//! and consensus gating over the surviving agent set.

pub mod controller;

pub use controller::{
    ExcludedAgent, ExclusionReason, HoldAlert, RevocationController, TransactionReport,
    TransactionResolution,
};
