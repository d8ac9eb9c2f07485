//! Fraud Module
//!
//! Heuristic multi-factor risk scoring for payments and card issuance.

pub mod score;

pub use score::{
    score_payment, FraudAssessment, Recommendation, RiskLevel, REPUTABLE_MERCHANTS,
};
