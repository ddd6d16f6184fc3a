//! Entry form session
//!
//! A [`DraftSession`] owns one transaction draft for the lifetime of the
//! form. Choosing a payee starts a background history lookup; its result is
//! merged into the live draft only if the form is still open, the payee is
//! unchanged and the target fields are still untouched and unset. Closing or
//! dropping the session aborts the lookup.
//!
//! Methods that start background work must be called from within a Tokio
//! runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::autofill::suggest_for_payee;
use super::context::AppContext;
use super::submit::{SubmitOutcome, TransactionSubmitter};
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{AccountId, CategoryId, PayeeId, TransactionDraft};

#[derive(Debug)]
struct SessionState {
    draft: TransactionDraft,
    closed: bool,
    submitting: bool,
}

type SharedState = Arc<Mutex<SessionState>>;

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Names of the entities chosen in the draft, for read-only display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftDisplay {
    pub account: Option<String>,
    pub payee: Option<String>,
    pub category: Option<String>,
}

/// Clears the submitting flag however the submission ends
struct SubmittingGuard {
    state: SharedState,
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        lock(&self.state).submitting = false;
    }
}

/// One open "add transaction" form
pub struct DraftSession {
    ctx: AppContext,
    state: SharedState,
    autofill: Mutex<Option<JoinHandle<()>>>,
}

impl DraftSession {
    /// Open a form with an empty draft dated today
    pub fn new(ctx: AppContext) -> Self {
        let draft = TransactionDraft::new(ctx.clock.today());
        Self {
            ctx,
            state: Arc::new(Mutex::new(SessionState {
                draft,
                closed: false,
                submitting: false,
            })),
            autofill: Mutex::new(None),
        }
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> TransactionDraft {
        lock(&self.state).draft.clone()
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    fn edit<T>(&self, f: impl FnOnce(&mut TransactionDraft) -> T) -> QuickAddResult<T> {
        let mut state = lock(&self.state);
        if state.closed {
            return Err(QuickAddError::SessionClosed);
        }
        Ok(f(&mut state.draft))
    }

    pub fn set_date(&self, date: NaiveDate) -> QuickAddResult<()> {
        self.edit(|d| d.set_date(date))
    }

    pub fn set_date_text(&self, text: &str) -> QuickAddResult<()> {
        self.edit(|d| d.set_date_text(text))?
    }

    pub fn set_account(&self, account: Option<AccountId>) -> QuickAddResult<()> {
        self.edit(|d| d.set_account(account))
    }

    pub fn set_category(&self, category: Option<CategoryId>) -> QuickAddResult<()> {
        self.edit(|d| d.set_category(category))
    }

    pub fn set_notes(&self, notes: &str) -> QuickAddResult<()> {
        self.edit(|d| d.set_notes(notes))
    }

    pub fn set_expense(&self, is_expense: bool) -> QuickAddResult<()> {
        self.edit(|d| d.set_expense(is_expense))
    }

    /// Update the amount text; returns whether the text was accepted
    pub fn set_amount_text(&self, text: &str) -> QuickAddResult<bool> {
        self.edit(|d| d.set_amount_text(text))
    }

    /// Choose or clear the payee
    ///
    /// Choosing a payee takes effect immediately and starts a history lookup
    /// in the background, replacing any lookup still in flight. Clearing the
    /// payee cancels the lookup.
    pub fn select_payee(&self, payee: Option<PayeeId>) -> QuickAddResult<()> {
        let since = {
            let mut state = lock(&self.state);
            if state.closed {
                return Err(QuickAddError::SessionClosed);
            }
            state.draft.set_payee(payee.clone());
            state.draft.revisions()
        };

        self.cancel_autofill();

        let payee = match payee {
            Some(payee) if self.ctx.options.autofill_from_history => payee,
            _ => return Ok(()),
        };

        let state = Arc::clone(&self.state);
        let queries = Arc::clone(&self.ctx.queries);
        let handle = tokio::spawn(async move {
            let suggestion = match suggest_for_payee(queries.as_ref(), &payee).await {
                Ok(Some(suggestion)) => suggestion,
                Ok(None) => return,
                Err(e) => {
                    warn!(error = %e, payee = %payee, "payee history lookup failed");
                    return;
                }
            };

            let mut state = lock(&state);
            if state.closed {
                debug!(payee = %payee, "form closed, dropping payee suggestion");
                return;
            }
            if state.draft.payee() != Some(&payee) {
                debug!(payee = %payee, "payee changed, dropping stale suggestion");
                return;
            }

            let applied =
                state
                    .draft
                    .apply_suggestion(suggestion.account, suggestion.category, since);
            debug!(
                payee = %payee,
                account = applied.account,
                category = applied.category,
                "applied payee suggestion"
            );
        });

        *self
            .autofill
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }

    /// Wait until the current payee lookup, if any, has finished
    pub async fn wait_for_autofill(&self) {
        let handle = self
            .autofill
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!(error = %e, "payee lookup task failed");
                }
            }
        }
    }

    fn cancel_autofill(&self) {
        if let Some(handle) = self
            .autofill
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// Resolve names of the chosen account, payee and category
    pub fn display_names(&self) -> DraftDisplay {
        let draft = self.draft();
        let refs = &self.ctx.references;
        DraftDisplay {
            account: draft.account().and_then(|id| refs.account(id)).map(|a| a.name),
            payee: draft.payee().and_then(|id| refs.payee(id)).map(|p| p.name),
            category: draft
                .category()
                .and_then(|id| refs.category(id))
                .map(|c| c.name),
        }
    }

    /// Submit the draft
    ///
    /// Only one submission runs at a time; a second call while one is in
    /// flight fails with [`QuickAddError::SubmissionInProgress`]. On success
    /// the session is closed; on failure the draft is kept for another try.
    pub async fn submit(&self) -> QuickAddResult<SubmitOutcome> {
        let (draft, _guard) = {
            let mut state = lock(&self.state);
            if state.closed {
                return Err(QuickAddError::SessionClosed);
            }
            if state.submitting {
                return Err(QuickAddError::SubmissionInProgress);
            }
            state.submitting = true;
            (
                state.draft.clone(),
                SubmittingGuard {
                    state: Arc::clone(&self.state),
                },
            )
        };

        let outcome = TransactionSubmitter::new(&self.ctx).submit(&draft).await?;
        self.close();
        Ok(outcome)
    }

    /// Dismiss the form, discarding any pending lookup result
    pub fn close(&self) {
        lock(&self.state).closed = true;
        self.cancel_autofill();
    }
}

impl Drop for DraftSession {
    fn drop(&mut self) {
        self.cancel_autofill();
    }
}
