//! In-memory fakes of the data engine for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::Notify;

use super::api::{Query, QueryApi, QueryResult, WriteApi};
use super::clock::FixedClock;
use super::context::{AppContext, EntryOptions};
use super::notify::RecordingSink;
use super::reference::InMemoryReferenceCache;
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{
    Account, AccountId, BudgetCell, BudgetMonth, Category, CategoryGroup, CategoryId, Payee,
    TransactionBatch,
};

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

/// Query API answering from canned history rows and budget cells
#[derive(Default)]
pub struct FakeQueries {
    history: Mutex<HashMap<String, Vec<serde_json::Value>>>,
    cells: Mutex<Vec<BudgetCell>>,
    fail_budget: Mutex<bool>,
    gate: Mutex<Option<Arc<Notify>>>,
    seen_queries: Mutex<Vec<Query>>,
    seen_months: Mutex<Vec<BudgetMonth>>,
}

impl FakeQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a prior transaction for a payee
    pub fn with_history(self, payee: &str, account: Option<&str>, category: Option<&str>) -> Self {
        lock(&self.history)
            .entry(payee.to_string())
            .or_default()
            .push(json!({ "account": account, "category": category }));
        self
    }

    pub fn with_cell(self, name: &str, cents: i64) -> Self {
        lock(&self.cells).push(BudgetCell::new(name, crate::models::Money::from_cents(cents)));
        self
    }

    pub fn failing_budget(self) -> Self {
        *lock(&self.fail_budget) = true;
        self
    }

    /// Hold transaction queries until the returned handle is notified
    pub fn gated(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock(&self.gate) = Some(Arc::clone(&notify));
        notify
    }

    pub fn seen_queries(&self) -> Vec<Query> {
        lock(&self.seen_queries).clone()
    }

    pub fn seen_months(&self) -> Vec<BudgetMonth> {
        lock(&self.seen_months).clone()
    }
}

#[async_trait]
impl QueryApi for FakeQueries {
    async fn run_query(&self, query: &Query) -> QuickAddResult<QueryResult> {
        lock(&self.seen_queries).push(query.clone());

        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let payee = query
            .filter
            .iter()
            .find(|f| f.field == "payee")
            .and_then(|f| f.value.as_str())
            .unwrap_or_default()
            .to_string();
        let rows = lock(&self.history).get(&payee).cloned().unwrap_or_default();
        let limit = query.limit.unwrap_or(rows.len());
        Ok(QueryResult {
            data: rows.into_iter().take(limit).collect(),
        })
    }

    async fn budget_month(&self, month: BudgetMonth) -> QuickAddResult<Vec<BudgetCell>> {
        lock(&self.seen_months).push(month);
        if *lock(&self.fail_budget) {
            return Err(QuickAddError::Query("budget unavailable".into()));
        }
        Ok(lock(&self.cells).clone())
    }
}

/// Write API recording batches
#[derive(Default)]
pub struct FakeWriter {
    batches: Mutex<Vec<TransactionBatch>>,
    fail: Mutex<bool>,
    entered: Arc<Notify>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        *lock(&self.fail) = fail;
    }

    /// Notified whenever a write starts
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    /// Hold writes until the returned handle is notified
    pub fn gated(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock(&self.gate) = Some(Arc::clone(&notify));
        notify
    }

    pub fn batches(&self) -> Vec<TransactionBatch> {
        lock(&self.batches).clone()
    }
}

#[async_trait]
impl WriteApi for FakeWriter {
    async fn batch_add(&self, batch: TransactionBatch) -> QuickAddResult<()> {
        self.entered.notify_one();

        let gate = lock(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if *lock(&self.fail) {
            return Err(QuickAddError::Write("server unreachable".into()));
        }
        lock(&self.batches).push(batch);
        Ok(())
    }
}

/// A context wired to fakes, with handles kept for assertions
pub struct Harness {
    pub ctx: AppContext,
    pub queries: Arc<FakeQueries>,
    pub writer: Arc<FakeWriter>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    pub fn new(queries: FakeQueries) -> Self {
        Self::with_options(queries, EntryOptions::default())
    }

    pub fn with_options(queries: FakeQueries, options: EntryOptions) -> Self {
        let references = InMemoryReferenceCache::new(
            vec![Account::new("A", "Checking"), Account::new("B", "Credit Card")],
            vec![Payee::new("p1", "Corner Shop"), Payee::new("p-new", "New Place")],
            vec![CategoryGroup::new("g1", "Needs")
                .with_category(Category::new("C", "Groceries"))
                .with_category(Category::new("cat123", "Dining"))],
        );
        let queries = Arc::new(queries);
        let writer = Arc::new(FakeWriter::new());
        let sink = Arc::new(RecordingSink::new());

        let ctx = AppContext {
            references: Arc::new(references),
            notifications: sink.clone(),
            queries: queries.clone(),
            writer: writer.clone(),
            clock: Arc::new(FixedClock(today())),
            options,
        };

        Self {
            ctx,
            queries,
            writer,
            sink,
        }
    }
}

pub fn account(id: &str) -> AccountId {
    AccountId::from(id)
}

pub fn category(id: &str) -> CategoryId {
    CategoryId::from(id)
}
