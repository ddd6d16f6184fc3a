//! Reference entities
//!
//! Accounts, payees and categories as seen by the entry form: an id and a
//! display name. The data engine owns the full records; the form only reads
//! these cached projections.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryGroupId, CategoryId, PayeeId};

/// An account transactions can be added to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Closed accounts are hidden from the account picker
    #[serde(default)]
    pub closed: bool,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            closed: false,
        }
    }
}

/// A payee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub id: PayeeId,
    pub name: String,
}

impl Payee {
    pub fn new(id: impl Into<PayeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A budget category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A named group of categories, as listed in the category picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: CategoryGroupId,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl CategoryGroup {
    pub fn new(id: impl Into<CategoryGroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Add a category to this group
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Payee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Normalize a name for case-insensitive matching
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_group_builder() {
        let group = CategoryGroup::new("grp1", "Needs")
            .with_category(Category::new("cat1", "Groceries"))
            .with_category(Category::new("cat2", "Rent"));
        assert_eq!(group.categories.len(), 2);
        assert_eq!(group.categories[1].name, "Rent");
    }

    #[test]
    fn test_account_closed_defaults_false() {
        let account: Account = serde_json::from_str(r#"{"id":"a1","name":"Checking"}"#).unwrap();
        assert!(!account.closed);
        assert_eq!(account.to_string(), "Checking");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Corner Shop "), "corner shop");
    }
}
