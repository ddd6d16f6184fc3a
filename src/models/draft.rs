//! Transaction draft
//!
//! The in-progress, not yet persisted transaction behind the entry form.
//! Amount text is validated on every update, so a draft never holds text
//! that is not a plain decimal number.

use chrono::NaiveDate;
use std::fmt;

use super::ids::{AccountId, CategoryId, PayeeId};
use super::money::Money;
use super::transaction::Transaction;
use crate::error::{QuickAddError, QuickAddResult};

/// Fields of the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Date,
    Account,
    Payee,
    Category,
    Notes,
    Amount,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::Account => "account",
            Self::Payee => "payee",
            Self::Category => "category",
            Self::Notes => "notes",
            Self::Amount => "amount",
        };
        f.write_str(name)
    }
}

/// Check whether text is acceptable as amount input
///
/// Accepts the empty string, or digits with at most one decimal point.
pub fn is_valid_amount_text(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == '.') && text.matches('.').count() <= 1
}

/// Counters of user edits to the fields auto-fill may populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRevisions {
    pub account: u64,
    pub category: u64,
}

/// Which fields an auto-fill suggestion actually populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppliedSuggestion {
    pub account: bool,
    pub category: bool,
}

impl AppliedSuggestion {
    pub fn any(&self) -> bool {
        self.account || self.category
    }
}

/// A new transaction being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    date: NaiveDate,
    account: Option<AccountId>,
    payee: Option<PayeeId>,
    category: Option<CategoryId>,
    notes: String,
    amount_text: String,
    is_expense: bool,
    revisions: FieldRevisions,
}

impl TransactionDraft {
    /// Create an empty expense draft dated `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today,
            account: None,
            payee: None,
            category: None,
            notes: String::new(),
            amount_text: String::new(),
            is_expense: true,
            revisions: FieldRevisions::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.account.as_ref()
    }

    pub fn payee(&self) -> Option<&PayeeId> {
        self.payee.as_ref()
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn is_expense(&self) -> bool {
        self.is_expense
    }

    pub fn revisions(&self) -> FieldRevisions {
        self.revisions
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Set the date from `YYYY-MM-DD` text
    pub fn set_date_text(&mut self, text: &str) -> QuickAddResult<()> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
            QuickAddError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", text))
        })?;
        self.date = date;
        Ok(())
    }

    /// Set or clear the account chosen by the user
    pub fn set_account(&mut self, account: Option<AccountId>) {
        self.account = account;
        self.revisions.account += 1;
    }

    /// Set or clear the category chosen by the user
    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.revisions.category += 1;
    }

    pub fn set_payee(&mut self, payee: Option<PayeeId>) {
        self.payee = payee;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_expense(&mut self, is_expense: bool) {
        self.is_expense = is_expense;
    }

    /// Replace the amount text if it is a valid number
    ///
    /// Returns `false` and keeps the previous text otherwise.
    pub fn set_amount_text(&mut self, text: &str) -> bool {
        if !is_valid_amount_text(text) {
            return false;
        }
        self.amount_text = text.to_string();
        true
    }

    /// Fill account/category from a history suggestion
    ///
    /// A field is populated only if it is currently unset and the user has
    /// not edited it since `since` was taken.
    pub fn apply_suggestion(
        &mut self,
        account: Option<AccountId>,
        category: Option<CategoryId>,
        since: FieldRevisions,
    ) -> AppliedSuggestion {
        let mut applied = AppliedSuggestion::default();

        if let Some(account) = account {
            if self.account.is_none() && self.revisions.account == since.account {
                self.account = Some(account);
                applied.account = true;
            }
        }

        if let Some(category) = category {
            if self.category.is_none() && self.revisions.category == since.category {
                self.category = Some(category);
                applied.category = true;
            }
        }

        applied
    }

    /// Fields that must be filled before submission
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.account.is_none() {
            missing.push(DraftField::Account);
        }
        if self.amount_text.is_empty() {
            missing.push(DraftField::Amount);
        }
        missing
    }

    /// Build the transaction to persist from this draft
    pub fn normalize(&self) -> QuickAddResult<Transaction> {
        let missing = self.missing_fields();
        let account = match (&self.account, missing.is_empty()) {
            (Some(account), true) => account.clone(),
            _ => return Err(QuickAddError::IncompleteDraft { missing }),
        };

        let amount = Money::from_amount_text(&self.amount_text, self.is_expense)
            .map_err(|e| QuickAddError::Validation(e.to_string()))?;

        let mut txn = Transaction::new_unsaved(account, self.date, amount);
        txn.payee = self.payee.clone();
        txn.category = self.category.clone();
        txn.notes = self.notes.clone();
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = TransactionDraft::new(today());
        assert_eq!(draft.date(), today());
        assert!(draft.is_expense());
        assert!(draft.account().is_none());
        assert_eq!(draft.amount_text(), "");
        assert_eq!(draft.notes(), "");
    }

    #[test]
    fn test_amount_text_validation() {
        assert!(is_valid_amount_text(""));
        assert!(is_valid_amount_text("12"));
        assert!(is_valid_amount_text("12.5"));
        assert!(is_valid_amount_text(".5"));
        assert!(!is_valid_amount_text("12a"));
        assert!(!is_valid_amount_text("1.2.3"));
        assert!(!is_valid_amount_text("-3"));
        assert!(!is_valid_amount_text("1e5"));
    }

    #[test]
    fn test_invalid_amount_keeps_previous_value() {
        let mut draft = TransactionDraft::new(today());
        assert!(draft.set_amount_text("12"));
        assert!(!draft.set_amount_text("12a"));
        assert_eq!(draft.amount_text(), "12");
        assert!(draft.set_amount_text(""));
        assert_eq!(draft.amount_text(), "");
    }

    #[test]
    fn test_set_date_text() {
        let mut draft = TransactionDraft::new(today());
        draft.set_date_text("2024-02-29").unwrap();
        assert_eq!(draft.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let err = draft.set_date_text("29/02/2024").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(draft.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_suggestion_fills_only_unset_fields() {
        let mut draft = TransactionDraft::new(today());
        draft.set_account(Some(AccountId::from("B")));
        let since = draft.revisions();

        let applied = draft.apply_suggestion(
            Some(AccountId::from("A")),
            Some(CategoryId::from("C")),
            since,
        );

        assert_eq!(draft.account(), Some(&AccountId::from("B")));
        assert_eq!(draft.category(), Some(&CategoryId::from("C")));
        assert!(!applied.account);
        assert!(applied.category);
    }

    #[test]
    fn test_suggestion_respects_clear_made_after_lookup_started() {
        let mut draft = TransactionDraft::new(today());
        let since = draft.revisions();

        // user picks and then clears the category while the lookup is running
        draft.set_category(Some(CategoryId::from("X")));
        draft.set_category(None);

        let applied = draft.apply_suggestion(
            Some(AccountId::from("A")),
            Some(CategoryId::from("C")),
            since,
        );

        assert_eq!(draft.account(), Some(&AccountId::from("A")));
        assert!(draft.category().is_none());
        assert!(applied.account);
        assert!(!applied.category);
    }

    #[test]
    fn test_normalize_requires_account_and_amount() {
        let draft = TransactionDraft::new(today());
        match draft.normalize() {
            Err(QuickAddError::IncompleteDraft { missing }) => {
                assert_eq!(missing, vec![DraftField::Account, DraftField::Amount]);
            }
            other => panic!("expected incomplete draft, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_builds_transaction() {
        let mut draft = TransactionDraft::new(today());
        draft.set_account(Some(AccountId::from("acct")));
        draft.set_payee(Some(PayeeId::from("payee")));
        draft.set_category(Some(CategoryId::from("cat")));
        draft.set_notes("lunch");
        draft.set_amount_text("19.99");

        let txn = draft.normalize().unwrap();
        assert!(txn.id.is_temp());
        assert_eq!(txn.amount.cents(), -1999);
        assert_eq!(txn.account, AccountId::from("acct"));
        assert_eq!(txn.payee, Some(PayeeId::from("payee")));
        assert_eq!(txn.category, Some(CategoryId::from("cat")));
        assert_eq!(txn.notes, "lunch");
        assert_eq!(txn.date, today());
        assert!(!txn.cleared);
    }

    #[test]
    fn test_normalize_income() {
        let mut draft = TransactionDraft::new(today());
        draft.set_account(Some(AccountId::from("acct")));
        draft.set_amount_text("0.1");
        draft.set_expense(false);

        assert_eq!(draft.normalize().unwrap().amount.cents(), 10);
    }

    #[test]
    fn test_normalize_rejects_lone_decimal_point() {
        let mut draft = TransactionDraft::new(today());
        draft.set_account(Some(AccountId::from("acct")));
        draft.set_amount_text(".");

        assert!(matches!(draft.normalize(), Err(QuickAddError::Validation(_))));
    }
}
