//! Consensus Module
//!
//! Multi-agent transaction voting:
//! - Agent roster with role-keyed rule selection
//! - Fixed per-role voting rules behind an injectable policy seam
//! - Risk-tiered approval thresholds with rounded-rate comparison

pub mod engine;
pub mod roster;
pub mod rules;

pub use engine::{
    required_threshold, AgentVote, ConsensusEngine, ConsensusOutcome, AUTO_APPROVE_FLOOR,
};
pub use roster::{Agent, AgentRole, AgentStatus, Roster};
pub use rules::{is_known_merchant, RoleRules, VotePolicy, KNOWN_MERCHANTS};
