//! Multi-dimensional fraud scoring.
//!
//! Heuristic risk score over amount, time of day, merchant reputation,
//! and deviation from typical per-merchant spend. Used to gate card
//! issuance; separate from the consensus path.

use crate::core::{validate, Result};
use serde::{Deserialize, Serialize};

/// Merchants with an established reputation for scoring purposes.
pub const REPUTABLE_MERCHANTS: [&str; 7] = [
    "amazon", "netflix", "stripe", "uber", "github", "apple", "google",
];

/// Typical spend per merchant; pairs of (merchant, amount).
const TYPICAL_SPEND: [(&str, f64); 4] = [
    ("netflix", 15.0),
    ("spotify", 10.0),
    ("amazon", 50.0),
    ("uber", 25.0),
];

/// Typical spend assumed for merchants without a profile.
const DEFAULT_TYPICAL_SPEND: f64 = 50.0;

/// Qualitative risk level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// What to do with the payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Proceed without intervention
    AutoApprove,
    /// Route to manual review
    Review,
    /// Decline outright
    Block,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::AutoApprove => write!(f, "Auto-approve"),
            Recommendation::Review => write!(f, "Review"),
            Recommendation::Block => write!(f, "Block"),
        }
    }
}

/// Result of scoring one payment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Total score, 0-100
    pub score: f64,
    /// Qualitative level
    pub level: RiskLevel,
    /// Contributing factors
    pub reasons: Vec<String>,
}

impl FraudAssessment {
    /// Joined reason string, or a consistency note when nothing fired.
    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            "Consistent with typical patterns".to_string()
        } else {
            self.reasons.join(" + ")
        }
    }

    /// Recommended handling for this score.
    pub fn recommendation(&self) -> Recommendation {
        if self.score > 60.0 {
            Recommendation::Block
        } else if self.score >= 30.0 {
            Recommendation::Review
        } else {
            Recommendation::AutoApprove
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score a payment for fraud risk.
///
/// `hour` is the UTC hour of the transaction (0-23).
pub fn score_payment(amount: f64, merchant: &str, hour: u32) -> Result<FraudAssessment> {
    validate::amount(amount)?;
    let merchant = validate::merchant(merchant)?;
    validate::hour(hour)?;

    let lowered = merchant.to_lowercase();

    // Volume-based scoring (max 40 pts).
    let amount_score = (amount / 125.0).min(40.0);

    // Time-of-day scoring (max 30 pts). Late night increases risk.
    let time_score = if hour <= 5 { 30.0 } else { 0.0 };

    // Reputation scoring (max 30 pts).
    let merchant_score = if REPUTABLE_MERCHANTS.contains(&lowered.as_str()) {
        0.0
    } else {
        30.0
    };

    // Anomaly scoring (max 25 pts): deviation from typical spend.
    let typical = TYPICAL_SPEND
        .iter()
        .find(|(m, _)| *m == lowered)
        .map(|(_, t)| *t)
        .unwrap_or(DEFAULT_TYPICAL_SPEND);
    let anomaly_score = if amount > typical * 20.0 { 25.0 } else { 0.0 };

    let total = round1((amount_score + time_score + merchant_score + anomaly_score).min(100.0));

    let level = if total < 30.0 {
        RiskLevel::Low
    } else if total <= 60.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    let mut reasons = Vec::new();
    if amount_score >= 10.0 {
        reasons.push("Significant amount".to_string());
    }
    if time_score > 0.0 {
        reasons.push("Suspicious hour detected".to_string());
    }
    if merchant_score > 0.0 {
        reasons.push("Unverified merchant".to_string());
    }
    if anomaly_score > 0.0 {
        reasons.push(format!("Spend Anomaly for {merchant}"));
    }

    Ok(FraudAssessment {
        score: total,
        level,
        reasons,
    })
}
