//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{Account, AccountId, Category, CategoryId, Money};
use crate::services::ReferenceCache;

/// Find an account by ID or name
pub fn resolve_account(references: &dyn ReferenceCache, text: &str) -> QuickAddResult<Account> {
    references
        .account(&AccountId::from(text))
        .or_else(|| references.find_account_by_name(text))
        .ok_or_else(|| QuickAddError::account_not_found(text))
}

/// Find a category by ID or name
pub fn resolve_category(
    references: &dyn ReferenceCache,
    text: &str,
) -> QuickAddResult<Category> {
    references
        .category(&CategoryId::from(text))
        .or_else(|| references.find_category_by_name(text))
        .ok_or_else(|| QuickAddError::category_not_found(text))
}

/// Parse a signed amount such as "-12.50"
pub fn parse_signed_amount(text: &str) -> QuickAddResult<Money> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    Money::from_amount_text(digits, negative).map_err(|e| {
        QuickAddError::Validation(format!("Invalid amount '{}': {}", text, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryGroup, Payee};
    use crate::services::InMemoryReferenceCache;

    fn references() -> InMemoryReferenceCache {
        InMemoryReferenceCache::new(
            vec![Account::new("A", "Checking")],
            vec![Payee::new("p1", "Corner Shop")],
            vec![CategoryGroup::new("g1", "Needs").with_category(Category::new("C", "Groceries"))],
        )
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let refs = references();
        assert_eq!(resolve_account(&refs, "A").unwrap().name, "Checking");
        assert_eq!(resolve_account(&refs, "checking").unwrap().id.as_str(), "A");
        assert_eq!(resolve_category(&refs, "Groceries").unwrap().id.as_str(), "C");
        assert!(resolve_account(&refs, "Savings").unwrap_err().is_not_found());
    }

    #[test]
    fn test_parse_signed_amount() {
        assert_eq!(parse_signed_amount("-5").unwrap(), Money::from_cents(-500));
        assert_eq!(parse_signed_amount("123.45").unwrap(), Money::from_cents(12345));
        assert!(parse_signed_amount("abc").unwrap_err().is_validation());
    }
}
