//! Transaction display formatting
//!
//! Provides utilities for formatting a stored transaction for terminal
//! display, with entity ids resolved to names.

use crate::models::Transaction;
use crate::services::ReferenceCache;

/// Format a single transaction as a register row
pub fn format_transaction_row(
    txn: &Transaction,
    references: &dyn ReferenceCache,
    currency_symbol: &str,
) -> String {
    let status_icon = if txn.cleared { "✓" } else { " " };
    let payee = txn
        .payee
        .as_ref()
        .and_then(|id| references.payee(id))
        .map(|p| p.name)
        .unwrap_or_else(|| "(no payee)".to_string());

    format!(
        "{} {} {:20} {:>12}",
        status_icon,
        txn.date.format("%Y-%m-%d"),
        truncate(&payee, 20),
        txn.amount.format_with_symbol(currency_symbol)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    references: &dyn ReferenceCache,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    if !txn.id.is_temp() {
        output.push_str(&format!("Transaction: {}\n", txn.id));
    }
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency_symbol)
    ));

    let account = references
        .account(&txn.account)
        .map(|a| a.name)
        .unwrap_or_else(|| txn.account.to_string());
    output.push_str(&format!("Account:     {}\n", account));

    if let Some(payee) = txn.payee.as_ref().and_then(|id| references.payee(id)) {
        output.push_str(&format!("Payee:       {}\n", payee.name));
    }

    match txn.category.as_ref().and_then(|id| references.category(id)) {
        Some(category) => output.push_str(&format!("Category:    {}\n", category.name)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
