//! Per-role voting rules.
//!
//! The fixed business rules each role votes by. The engine consumes them
//! through the `VotePolicy` seam so tests and callers can inject
//! alternative rule sets.

use crate::consensus::roster::AgentRole;
use crate::ledger::VoteDecision;

/// Merchants the compliance rule recognizes.
pub const KNOWN_MERCHANTS: [&str; 5] = ["amazon", "netflix", "stripe", "uber", "github"];

/// Amount ceiling above which the finance rule rejects.
pub const FINANCE_CEILING: f64 = 10_000.0;

/// Amount above which the audit rule escalates to review.
pub const AUDIT_REVIEW_FLOOR: f64 = 500.0;

/// Case-insensitive known-merchant check.
pub fn is_known_merchant(merchant: &str) -> bool {
    let lowered = merchant.to_lowercase();
    KNOWN_MERCHANTS.contains(&lowered.as_str())
}

/// Injected voting capability: given a role and a transaction, produce a
/// decision.
pub trait VotePolicy: Send + Sync {
    /// Decide how an agent of `role` votes on the transaction.
    fn decide(&self, role: AgentRole, amount: f64, merchant: &str) -> VoteDecision;
}

/// The fixed per-role rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoleRules;

impl VotePolicy for RoleRules {
    fn decide(&self, role: AgentRole, amount: f64, merchant: &str) -> VoteDecision {
        match role {
            AgentRole::Finance => {
                if amount <= FINANCE_CEILING {
                    VoteDecision::Approve
                } else {
                    VoteDecision::Reject
                }
            }
            AgentRole::Compliance => {
                if is_known_merchant(merchant) {
                    VoteDecision::Approve
                } else {
                    VoteDecision::Review
                }
            }
            AgentRole::Audit => {
                if amount > AUDIT_REVIEW_FLOOR {
                    VoteDecision::Review
                } else {
                    VoteDecision::Approve
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finance_ceiling() {
        let rules = RoleRules;
        assert_eq!(
            rules.decide(AgentRole::Finance, 10_000.0, "amazon"),
            VoteDecision::Approve
        );
        assert_eq!(
            rules.decide(AgentRole::Finance, 10_000.01, "amazon"),
            VoteDecision::Reject
        );
    }

    #[test]
    fn test_compliance_merchant_check() {
        let rules = RoleRules;
        assert_eq!(
            rules.decide(AgentRole::Compliance, 50.0, "Amazon"),
            VoteDecision::Approve
        );
        assert_eq!(
            rules.decide(AgentRole::Compliance, 50.0, "shady-store"),
            VoteDecision::Review
        );
    }

    #[test]
    fn test_audit_review_floor() {
        let rules = RoleRules;
        assert_eq!(
            rules.decide(AgentRole::Audit, 500.0, "amazon"),
            VoteDecision::Approve
        );
        assert_eq!(
            rules.decide(AgentRole::Audit, 500.01, "amazon"),
            VoteDecision::Review
        );
    }

    #[test]
    fn test_known_merchants_case_insensitive() {
        assert!(is_known_merchant("GitHub"));
        assert!(is_known_merchant("NETFLIX"));
        assert!(!is_known_merchant("github-sponsors"));
    }
}
