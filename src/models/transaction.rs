//! Transaction models
//!
//! `DraftTransaction` is the transient result of parsing the current input;
//! `TransactionRecord` is what the store keeps once a draft is submitted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::wallet::WalletType;

/// A parsed, not-yet-submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTransaction {
    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Merchant name, empty when none was selected
    #[serde(default)]
    pub merchant: String,

    /// Category name, empty when none was selected
    #[serde(default)]
    pub category: String,

    /// Transaction date, serialized as YYYY-MM-DD
    pub date: NaiveDate,

    /// Optional free-form note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Wallet name
    pub wallet: String,

    /// Wallet type
    pub wallet_type: WalletType,
}

impl DraftTransaction {
    /// Only drafts with a non-zero amount may be handed to the store
    pub fn is_submittable(&self) -> bool {
        !self.amount.is_zero()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

/// A persisted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier, assigned by the store
    pub id: TransactionId,

    /// Wallet name
    pub wallet: String,

    /// Wallet type
    pub wallet_type: WalletType,

    /// Merchant name
    #[serde(default)]
    pub merchant: String,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a new record from a submitted draft
    pub fn from_draft(draft: &DraftTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            wallet: draft.wallet.clone(),
            wallet_type: draft.wallet_type,
            merchant: draft.merchant.clone(),
            category: draft.category.clone(),
            description: draft.description.clone(),
            amount: draft.amount,
            date: draft.date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let merchant = if self.merchant.is_empty() {
            "(no merchant)"
        } else {
            &self.merchant
        };
        write!(
            f,
            "{} {} {} [{}]",
            self.date.format("%Y-%m-%d"),
            merchant,
            self.amount,
            self.wallet
        )
    }
}
