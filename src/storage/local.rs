//! Local JSON data engine
//!
//! [`LocalStore`] keeps reference lists, transactions and budget cells in
//! JSON files under the data directory and serves them through the same
//! query, write and reference-cache interfaces the entry form uses.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::file_io::{read_json, write_json_atomic};
use super::query::evaluate;
use crate::config::QuickAddPaths;
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{
    Account, AccountId, BudgetCell, BudgetMonth, Category, CategoryGroup, CategoryGroupId,
    CategoryId, Money, Payee, PayeeId, Transaction, TransactionBatch, TransactionId,
};
use crate::services::autofill::TRANSACTIONS_TABLE;
use crate::services::{
    InMemoryReferenceCache, Query, QueryApi, QueryResult, ReferenceCache, WriteApi,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PayeeData {
    payees: Vec<Payee>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CategoryData {
    groups: Vec<CategoryGroup>,
}

/// Transactions, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Budget cells keyed by `YYYY-MM`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    months: BTreeMap<String, Vec<BudgetCell>>,
}

/// Default category groups created on first run
const DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    (
        "Bills",
        &["Rent/Mortgage", "Electric", "Water", "Internet", "Phone", "Insurance"],
    ),
    ("Needs", &["Groceries", "Transportation", "Medical", "Household"]),
    ("Wants", &["Dining Out", "Entertainment", "Shopping", "Subscriptions"]),
    ("Savings", &["Emergency Fund", "Vacation", "Large Purchases"]),
];

#[derive(Debug, Default)]
struct References {
    accounts: Vec<Account>,
    payees: Vec<Payee>,
    groups: Vec<CategoryGroup>,
    cache: InMemoryReferenceCache,
}

impl References {
    fn rebuild(&mut self) {
        self.cache = InMemoryReferenceCache::new(
            self.accounts.clone(),
            self.payees.clone(),
            self.groups.clone(),
        );
    }
}

/// JSON-file backed data engine
pub struct LocalStore {
    paths: QuickAddPaths,
    references: RwLock<References>,
    transactions: RwLock<Vec<Transaction>>,
    budget: RwLock<BudgetData>,
}

fn read_lock<T>(lock: &RwLock<T>) -> QuickAddResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| QuickAddError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write_lock<T>(lock: &RwLock<T>) -> QuickAddResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| QuickAddError::Storage(format!("Failed to acquire write lock: {}", e)))
}

impl LocalStore {
    /// Create the data directory and seed default categories on first run
    pub fn initialize(paths: &QuickAddPaths) -> QuickAddResult<()> {
        paths.ensure_directories()?;

        if !paths.categories_file().exists() {
            let groups = DEFAULT_GROUPS
                .iter()
                .map(|(group, categories)| CategoryGroup {
                    id: CategoryGroupId::new(),
                    name: group.to_string(),
                    categories: categories
                        .iter()
                        .map(|name| Category::new(CategoryId::new(), *name))
                        .collect(),
                })
                .collect();
            write_json_atomic(paths.categories_file(), &CategoryData { groups })?;
        }

        Ok(())
    }

    /// Load every data file under `paths`
    pub fn open(paths: QuickAddPaths) -> QuickAddResult<Self> {
        let accounts: AccountData = read_json(paths.accounts_file())?;
        let payees: PayeeData = read_json(paths.payees_file())?;
        let categories: CategoryData = read_json(paths.categories_file())?;
        let transactions: TransactionData = read_json(paths.transactions_file())?;
        let budget: BudgetData = read_json(paths.budget_file())?;

        let mut references = References {
            accounts: accounts.accounts,
            payees: payees.payees,
            groups: categories.groups,
            cache: InMemoryReferenceCache::default(),
        };
        references.rebuild();

        debug!(
            accounts = references.accounts.len(),
            payees = references.payees.len(),
            transactions = transactions.transactions.len(),
            "opened local store"
        );

        Ok(Self {
            paths,
            references: RwLock::new(references),
            transactions: RwLock::new(transactions.transactions),
            budget: RwLock::new(budget),
        })
    }

    pub fn paths(&self) -> &QuickAddPaths {
        &self.paths
    }

    /// All stored transactions, newest first
    pub fn transactions(&self) -> QuickAddResult<Vec<Transaction>> {
        Ok(read_lock(&self.transactions)?.clone())
    }

    /// Create an account
    pub fn add_account(&self, name: &str) -> QuickAddResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuickAddError::Validation(
                "Account name cannot be empty".into(),
            ));
        }

        let mut refs = write_lock(&self.references)?;
        if refs.cache.find_account_by_name(name).is_some() {
            return Err(QuickAddError::Validation(format!(
                "Account already exists: {}",
                name
            )));
        }

        let account = Account::new(AccountId::new(), name);
        let mut accounts = refs.accounts.clone();
        accounts.push(account.clone());
        write_json_atomic(
            self.paths.accounts_file(),
            &AccountData {
                accounts: accounts.clone(),
            },
        )?;

        refs.accounts = accounts;
        refs.rebuild();
        Ok(account)
    }

    /// Find a payee by name, creating it if it does not exist
    pub fn get_or_create_payee(&self, name: &str) -> QuickAddResult<Payee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuickAddError::Validation("Payee name cannot be empty".into()));
        }

        let mut refs = write_lock(&self.references)?;
        if let Some(payee) = refs.cache.find_payee_by_name(name) {
            return Ok(payee);
        }

        let payee = Payee::new(PayeeId::new(), name);
        let mut payees = refs.payees.clone();
        payees.push(payee.clone());
        write_json_atomic(
            self.paths.payees_file(),
            &PayeeData {
                payees: payees.clone(),
            },
        )?;

        debug!(payee = %payee.id, name = %payee.name, "created payee");
        refs.payees = payees;
        refs.rebuild();
        Ok(payee)
    }

    /// Set a category's leftover amount for a month
    pub fn set_leftover(
        &self,
        month: BudgetMonth,
        category: &CategoryId,
        value: Money,
    ) -> QuickAddResult<()> {
        let mut budget = write_lock(&self.budget)?;
        let mut updated = budget.clone();

        let name = month.leftover_cell_name(category);
        let cells = updated.months.entry(month.to_string()).or_default();
        match cells.iter_mut().find(|c| c.name == name) {
            Some(cell) => cell.value = value,
            None => cells.push(BudgetCell::new(name, value)),
        }

        write_json_atomic(self.paths.budget_file(), &updated)?;
        *budget = updated;
        Ok(())
    }

    fn transaction_rows(&self) -> QuickAddResult<Vec<serde_json::Value>> {
        read_lock(&self.transactions)?
            .iter()
            .map(|t| serde_json::to_value(t).map_err(QuickAddError::from))
            .collect()
    }

    /// Apply new transactions to the leftover cells of their months
    ///
    /// Returns whether any cell changed.
    fn apply_to_budget(budget: &mut BudgetData, added: &[Transaction]) -> QuickAddResult<bool> {
        let mut changed = false;
        for txn in added {
            let category = match &txn.category {
                Some(category) => category,
                None => continue,
            };
            let month = BudgetMonth::containing(txn.date);
            let name = month.leftover_cell_name(category);
            if let Some(cell) = budget
                .months
                .get_mut(&month.to_string())
                .and_then(|cells| cells.iter_mut().find(|c| c.name == name))
            {
                cell.value = cell.value.checked_add(txn.amount).ok_or_else(|| {
                    QuickAddError::Validation(format!(
                        "Leftover amount out of range for category {} in {}",
                        category, month
                    ))
                })?;
                changed = true;
            }
        }
        Ok(changed)
    }
}

impl ReferenceCache for LocalStore {
    fn accounts(&self) -> Vec<Account> {
        read_lock(&self.references)
            .map(|r| r.cache.accounts())
            .unwrap_or_default()
    }

    fn payees(&self) -> Vec<Payee> {
        read_lock(&self.references)
            .map(|r| r.cache.payees())
            .unwrap_or_default()
    }

    fn category_groups(&self) -> Vec<CategoryGroup> {
        read_lock(&self.references)
            .map(|r| r.cache.category_groups())
            .unwrap_or_default()
    }

    fn account(&self, id: &AccountId) -> Option<Account> {
        read_lock(&self.references).ok()?.cache.account(id)
    }

    fn payee(&self, id: &PayeeId) -> Option<Payee> {
        read_lock(&self.references).ok()?.cache.payee(id)
    }

    fn category(&self, id: &CategoryId) -> Option<Category> {
        read_lock(&self.references).ok()?.cache.category(id)
    }
}

#[async_trait]
impl QueryApi for LocalStore {
    async fn run_query(&self, query: &Query) -> QuickAddResult<QueryResult> {
        if query.table != TRANSACTIONS_TABLE {
            return Err(QuickAddError::Query(format!(
                "Unknown table: {}",
                query.table
            )));
        }

        let rows = self.transaction_rows()?;
        Ok(QueryResult {
            data: evaluate(query, rows),
        })
    }

    async fn budget_month(&self, month: BudgetMonth) -> QuickAddResult<Vec<BudgetCell>> {
        Ok(read_lock(&self.budget)?
            .months
            .get(&month.to_string())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl WriteApi for LocalStore {
    async fn batch_add(&self, batch: TransactionBatch) -> QuickAddResult<()> {
        {
            let refs = read_lock(&self.references)?;
            for txn in &batch.added {
                if refs.cache.account(&txn.account).is_none() {
                    return Err(QuickAddError::account_not_found(txn.account.to_string()));
                }
                if let Some(category) = &txn.category {
                    if refs.cache.category(category).is_none() {
                        return Err(QuickAddError::category_not_found(category.to_string()));
                    }
                }
            }
        }

        let added: Vec<Transaction> = batch
            .added
            .into_iter()
            .map(|mut txn| {
                if txn.id.is_temp() {
                    txn.id = TransactionId::new();
                }
                txn
            })
            .collect();

        let mut transactions = write_lock(&self.transactions)?;
        let mut budget = write_lock(&self.budget)?;

        let mut updated_budget = budget.clone();
        let budget_changed = Self::apply_to_budget(&mut updated_budget, &added)?;

        let mut updated: Vec<Transaction> = added.iter().rev().cloned().collect();
        updated.extend(transactions.iter().cloned());
        write_json_atomic(
            self.paths.transactions_file(),
            &TransactionData {
                transactions: updated.clone(),
            },
        )?;

        if budget_changed {
            if let Err(e) = write_json_atomic(self.paths.budget_file(), &updated_budget) {
                let previous = TransactionData {
                    transactions: transactions.clone(),
                };
                let restored = write_json_atomic(self.paths.transactions_file(), &previous);
                if let Err(rollback) = restored {
                    warn!(
                        error = %rollback,
                        "failed to restore transactions after budget write error"
                    );
                }
                return Err(e);
            }
        }

        *transactions = updated;
        *budget = updated_budget;

        debug!(count = added.len(), "stored transactions");
        Ok(())
    }
}
