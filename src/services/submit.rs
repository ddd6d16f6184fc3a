//! Submission pipeline
//!
//! Validates and normalizes a draft, persists it through the write API,
//! then reports the category's remaining budget to the user.

use tracing::{info, warn};

use super::balance::category_balance;
use super::context::AppContext;
use super::notify::Notification;
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{AccountId, Money, Transaction, TransactionBatch, TransactionDraft};

/// Generic message when no balance can be reported
pub const ADDED_MESSAGE: &str = "Transaction added";

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The transaction as sent to storage
    pub transaction: Transaction,
    /// Leftover budget of the category, if known
    pub balance: Option<Money>,
    /// The notification shown to the user
    pub notification: Notification,
    /// Account view to navigate to
    pub navigate_to: AccountId,
}

/// Service running one draft through validation, persistence and reporting
pub struct TransactionSubmitter<'a> {
    ctx: &'a AppContext,
}

impl<'a> TransactionSubmitter<'a> {
    /// Create a new submitter
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Submit a draft
    ///
    /// An incomplete draft is reported as a warning and nothing is written.
    /// A failed write is reported as an error and returned as
    /// [`QuickAddError::Write`], leaving the draft untouched for a retry.
    pub async fn submit(&self, draft: &TransactionDraft) -> QuickAddResult<SubmitOutcome> {
        let txn = match draft.normalize() {
            Ok(txn) => txn,
            Err(e) => {
                warn!(error = %e, "rejected incomplete transaction");
                self.ctx
                    .notifications
                    .notify(Notification::warning(e.to_string()));
                return Err(e);
            }
        };

        if let Err(e) = self
            .ctx
            .writer
            .batch_add(TransactionBatch::single(txn.clone()))
            .await
        {
            let e = match e {
                QuickAddError::Write(_) => e,
                other => QuickAddError::Write(other.to_string()),
            };
            warn!(error = %e, account = %txn.account, "transaction write failed");
            self.ctx.notifications.notify(Notification::error(format!(
                "{}. Your entry was kept, try again.",
                e
            )));
            return Err(e);
        }

        info!(
            account = %txn.account,
            amount = txn.amount.cents(),
            date = %txn.date,
            "transaction added"
        );

        let balance = self.lookup_balance(&txn).await;
        let notification = self.compose_notification(&txn, balance);
        self.ctx.notifications.notify(notification.clone());

        Ok(SubmitOutcome {
            navigate_to: txn.account.clone(),
            transaction: txn,
            balance,
            notification,
        })
    }

    async fn lookup_balance(&self, txn: &Transaction) -> Option<Money> {
        if !self.ctx.options.report_category_balance {
            return None;
        }
        let category = txn.category.as_ref()?;

        let today = self.ctx.clock.today();
        match category_balance(self.ctx.queries.as_ref(), category, today).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!(error = %e, category = %category, "category balance unavailable");
                None
            }
        }
    }

    fn compose_notification(&self, txn: &Transaction, balance: Option<Money>) -> Notification {
        let (balance, category) = match (balance, &txn.category) {
            (Some(balance), Some(category)) => (balance, category),
            _ => return Notification::info(ADDED_MESSAGE),
        };

        let name = self
            .ctx
            .references
            .category(category)
            .map(|c| c.name)
            .unwrap_or_else(|| category.to_string());
        let message = format!(
            "{}. {} balance: {}",
            ADDED_MESSAGE,
            name,
            balance.to_decimal_string()
        );

        if balance.is_negative() {
            Notification::warning(message)
        } else {
            Notification::info(message)
        }
    }
}
