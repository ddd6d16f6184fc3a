//! Reference cache
//!
//! Read-only access to the cached account, payee and category lists the
//! form needs for pickers and for showing names of chosen ids.

use std::collections::HashMap;

use crate::models::reference::normalize_name;
use crate::models::{Account, AccountId, Category, CategoryGroup, CategoryId, Payee, PayeeId};

/// Keyed lookup over cached reference lists
pub trait ReferenceCache: Send + Sync {
    /// All accounts, in picker order
    fn accounts(&self) -> Vec<Account>;

    /// All payees, in picker order
    fn payees(&self) -> Vec<Payee>;

    /// All category groups with their categories
    fn category_groups(&self) -> Vec<CategoryGroup>;

    fn account(&self, id: &AccountId) -> Option<Account>;

    fn payee(&self, id: &PayeeId) -> Option<Payee>;

    fn category(&self, id: &CategoryId) -> Option<Category>;

    /// Find an account by name (case-insensitive)
    fn find_account_by_name(&self, name: &str) -> Option<Account> {
        let name = normalize_name(name);
        self.accounts()
            .into_iter()
            .find(|a| normalize_name(&a.name) == name)
    }

    /// Find a payee by name (case-insensitive)
    fn find_payee_by_name(&self, name: &str) -> Option<Payee> {
        let name = normalize_name(name);
        self.payees()
            .into_iter()
            .find(|p| normalize_name(&p.name) == name)
    }

    /// Find a category by name (case-insensitive)
    fn find_category_by_name(&self, name: &str) -> Option<Category> {
        let name = normalize_name(name);
        self.category_groups()
            .into_iter()
            .flat_map(|g| g.categories)
            .find(|c| normalize_name(&c.name) == name)
    }
}

/// Reference cache over lists held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceCache {
    accounts: Vec<Account>,
    payees: Vec<Payee>,
    groups: Vec<CategoryGroup>,
    account_index: HashMap<AccountId, usize>,
    payee_index: HashMap<PayeeId, usize>,
    category_index: HashMap<CategoryId, (usize, usize)>,
}

impl InMemoryReferenceCache {
    /// Build a cache and its id indexes
    pub fn new(accounts: Vec<Account>, payees: Vec<Payee>, groups: Vec<CategoryGroup>) -> Self {
        let account_index = accounts
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        let payee_index = payees
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        let category_index = groups
            .iter()
            .enumerate()
            .flat_map(|(gi, g)| {
                g.categories
                    .iter()
                    .enumerate()
                    .map(move |(ci, c)| (c.id.clone(), (gi, ci)))
            })
            .collect();

        Self {
            accounts,
            payees,
            groups,
            account_index,
            payee_index,
            category_index,
        }
    }
}

impl ReferenceCache for InMemoryReferenceCache {
    fn accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn payees(&self) -> Vec<Payee> {
        self.payees.clone()
    }

    fn category_groups(&self) -> Vec<CategoryGroup> {
        self.groups.clone()
    }

    fn account(&self, id: &AccountId) -> Option<Account> {
        self.account_index
            .get(id)
            .map(|&i| self.accounts[i].clone())
    }

    fn payee(&self, id: &PayeeId) -> Option<Payee> {
        self.payee_index.get(id).map(|&i| self.payees[i].clone())
    }

    fn category(&self, id: &CategoryId) -> Option<Category> {
        self.category_index
            .get(id)
            .map(|&(gi, ci)| self.groups[gi].categories[ci].clone())
    }
}
