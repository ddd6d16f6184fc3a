//! Category balance lookup
//!
//! Resolves what is left of a category's budget in the current month.

use chrono::NaiveDate;
use tracing::debug;

use super::api::QueryApi;
use crate::error::QuickAddResult;
use crate::models::{find_leftover, BudgetMonth, CategoryId, Money};

/// Leftover budget of `category` for the month containing `today`
///
/// Returns `Ok(None)` when the month has no leftover cell for the category.
pub async fn category_balance(
    queries: &dyn QueryApi,
    category: &CategoryId,
    today: NaiveDate,
) -> QuickAddResult<Option<Money>> {
    let month = BudgetMonth::containing(today);
    let cells = queries.budget_month(month).await?;
    let balance = find_leftover(&cells, month, category);

    debug!(month = %month, category = %category, balance = ?balance, "category balance");
    Ok(balance)
}
