//! Error types for VIGIL.

use thiserror::Error;

/// Result type alias for VIGIL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in VIGIL operations.
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors
    #[error("Merchant name required")]
    MerchantRequired,

    #[error("Amount must be positive, got {0}")]
    InvalidAmount(f64),

    #[error("Hour must be UTC (0-23), got {0}")]
    InvalidHour(u32),

    #[error("Decay factor must be in (0, 1), got {0}")]
    InvalidDecay(f64),

    #[error("Agent id required")]
    AgentIdRequired,

    #[error("Customer email required")]
    CustomerEmailRequired,

    // Consensus errors
    #[error("No quorum: no active agents remain to vote")]
    NoQuorum,

    // Trust errors
    #[error("Agent not registered: {0}")]
    AgentNotRegistered(String),

    // Issuance errors
    #[error("Card creation blocked: fraud score too high ({score}/100). Reason: {reason}")]
    IssuanceBlocked { score: f64, reason: String },

    #[error("Card requires manual review: fraud score {score}/100. Reason: {reason}")]
    IssuanceReview { score: f64, reason: String },

    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    // Fingerprint errors
    #[error("Invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidFingerprint(err.to_string())
    }
}
