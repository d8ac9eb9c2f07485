//! Issuance Module
//!
//! Merchant-locked card issuance gated on fraud scoring, plus simulated
//! receipt retrieval.

pub mod card;
pub mod receipts;

pub use card::{CardIssuer, IssuedCard, BLOCK_SCORE, CARD_VALIDITY_DAYS, REVIEW_SCORE};
pub use receipts::{recent_receipts, CustomerReceipts, Receipt, RECEIPT_MERCHANTS};
