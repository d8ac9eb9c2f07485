//! Simulated receipt retrieval.
//!
//! Produces demonstration receipts for a customer over a day window; no
//! real purchase data is involved.

use crate::core::{now, Error, Result};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Merchants appearing in simulated receipts.
pub const RECEIPT_MERCHANTS: [&str; 5] = ["Amazon", "Netflix", "Stripe", "Uber", "GitHub"];

/// Number of receipts a lookup returns.
const RECEIPTS_PER_LOOKUP: usize = 3;

/// A single simulated receipt.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    /// Purchase amount
    pub amount: f64,
    /// Merchant name
    pub merchant: String,
    /// Purchase date
    pub date: NaiveDate,
}

/// Receipts fetched for one customer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerReceipts {
    /// Customer the receipts belong to
    pub customer_email: String,
    /// The receipts, newest window first
    pub receipts: Vec<Receipt>,
}

/// Retrieve simulated recent receipts for a customer.
pub fn recent_receipts(customer_email: &str, days: i64) -> Result<CustomerReceipts> {
    let customer_email = customer_email.trim();
    if customer_email.is_empty() {
        return Err(Error::CustomerEmailRequired);
    }
    let customer_email = customer_email.to_string();

    let mut rng = rand::thread_rng();
    let receipts = (0..RECEIPTS_PER_LOOKUP)
        .map(|_| {
            let offset = rng.gen_range(0..=days.max(0));
            Receipt {
                amount: (rng.gen_range(5.00f64..=500.00) * 100.0).round() / 100.0,
                merchant: RECEIPT_MERCHANTS[rng.gen_range(0..RECEIPT_MERCHANTS.len())].to_string(),
                date: (now() - Duration::days(offset)).date_naive(),
            }
        })
        .collect();

    Ok(CustomerReceipts {
        customer_email,
        receipts,
    })
}
