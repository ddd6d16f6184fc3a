//! Core data models for quick transaction entry
//!
//! This module contains the data structures the entry form works with: the
//! draft being edited, the transaction it becomes, reference entities and
//! budget month cells.

pub mod budget;
pub mod draft;
pub mod ids;
pub mod money;
pub mod reference;
pub mod transaction;

pub use budget::{find_leftover, BudgetCell, BudgetMonth};
pub use draft::{
    is_valid_amount_text, AppliedSuggestion, DraftField, FieldRevisions, TransactionDraft,
};
pub use ids::{AccountId, CategoryGroupId, CategoryId, PayeeId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use reference::{Account, Category, CategoryGroup, Payee};
pub use transaction::{Transaction, TransactionBatch};
