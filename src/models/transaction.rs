//! Transaction model
//!
//! The normalized record produced from a draft at submit time, and the batch
//! envelope the write API accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, CategoryId, PayeeId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (`"temp"` until storage assigns one)
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// The account this transaction belongs to
    pub account: AccountId,

    /// Payee, if chosen
    pub payee: Option<PayeeId>,

    /// Category, if chosen
    pub category: Option<CategoryId>,

    /// Free-text notes
    #[serde(default)]
    pub notes: String,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Whether the transaction has cleared the bank
    #[serde(default)]
    pub cleared: bool,
}

impl Transaction {
    /// Create a new, not yet stored transaction
    pub fn new_unsaved(account: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::temp(),
            date,
            account,
            payee: None,
            category: None,
            notes: String::new(),
            amount,
            cleared: false,
        }
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

/// Write request adding transactions in one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBatch {
    pub added: Vec<Transaction>,
}

impl TransactionBatch {
    /// A batch adding exactly one transaction
    pub fn single(txn: Transaction) -> Self {
        Self { added: vec![txn] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unsaved_defaults() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::new_unsaved(AccountId::from("acct"), date, Money::from_cents(-5000));

        assert!(txn.id.is_temp());
        assert!(!txn.cleared);
        assert!(txn.is_outflow());
        assert!(txn.payee.is_none());
    }

    #[test]
    fn test_batch_serialization_shape() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let txn = Transaction::new_unsaved(AccountId::from("acct"), date, Money::from_cents(-1999));
        let json = serde_json::to_value(TransactionBatch::single(txn)).unwrap();

        assert_eq!(json["added"][0]["id"], "temp");
        assert_eq!(json["added"][0]["date"], "2025-01-15");
        assert_eq!(json["added"][0]["amount"], -1999);
        assert_eq!(json["added"][0]["cleared"], false);
    }
}
