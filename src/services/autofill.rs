//! Payee history auto-fill
//!
//! When a payee is chosen, the account and category of the most recent
//! transaction with that payee are offered as defaults. The suggestion is
//! advisory: applying it is left to the caller, which must re-check the live
//! draft.

use serde::Deserialize;
use tracing::debug;

use super::api::{Query, QueryApi};
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{AccountId, CategoryId, PayeeId};

/// Name of the transactions collection in the data engine
pub const TRANSACTIONS_TABLE: &str = "transactions";

/// Account and category last used with a payee
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PayeeSuggestion {
    #[serde(default)]
    pub account: Option<AccountId>,
    #[serde(default)]
    pub category: Option<CategoryId>,
}

/// The most recent transaction of a payee, projected to account and category
pub fn payee_history_query(payee: &PayeeId) -> Query {
    Query::table(TRANSACTIONS_TABLE)
        .filter("payee", payee.as_str())
        .order_by_desc("date")
        .limit(1)
        .select(["account", "category"])
}

/// Look up the suggestion for a payee
///
/// A payee without history yields `Ok(None)`.
pub async fn suggest_for_payee(
    queries: &dyn QueryApi,
    payee: &PayeeId,
) -> QuickAddResult<Option<PayeeSuggestion>> {
    let result = queries.run_query(&payee_history_query(payee)).await?;

    let row = match result.data.into_iter().next() {
        Some(row) => row,
        None => {
            debug!(payee = %payee, "no transaction history for payee");
            return Ok(None);
        }
    };

    let suggestion: PayeeSuggestion = serde_json::from_value(row).map_err(|e| {
        QuickAddError::Query(format!("Unexpected payee history row: {}", e))
    })?;

    debug!(
        payee = %payee,
        account = ?suggestion.account,
        category = ?suggestion.category,
        "payee history suggestion"
    );
    Ok(Some(suggestion))
}
