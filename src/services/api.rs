//! Data engine interfaces
//!
//! The entry form reads and writes through two collaborators: a query API
//! that evaluates declarative queries, and a write API that accepts
//! transaction batches. Both are async and injected as trait objects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuickAddResult;
use crate::models::{BudgetCell, BudgetMonth, TransactionBatch};

/// Sort direction of an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Equality filter on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Declarative query over a named collection
///
/// ```
/// use quickadd::services::Query;
///
/// let query = Query::table("transactions")
///     .filter("payee", "p1")
///     .order_by_desc("date")
///     .limit(1)
///     .select(["account", "category"]);
/// assert_eq!(query.limit, Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub table: String,
    #[serde(default)]
    pub filter: Vec<Filter>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Projected fields; empty selects every field
    #[serde(default)]
    pub select: Vec<String>,
}

impl Query {
    /// Start a query over a collection
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            filter: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            select: Vec::new(),
        }
    }

    /// Keep rows whose `field` equals `value`
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Order ascending by a field
    pub fn order_by_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            direction: Direction::Asc,
        });
        self
    }

    /// Order descending by a field
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            direction: Direction::Desc,
        });
        self
    }

    /// Limit the number of rows
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Project only the given fields
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Rows returned by a query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: Vec<Value>,
}

/// Read side of the data engine
#[async_trait]
pub trait QueryApi: Send + Sync {
    /// Evaluate a query
    async fn run_query(&self, query: &Query) -> QuickAddResult<QueryResult>;

    /// Fetch every cell of a budget month
    async fn budget_month(&self, month: BudgetMonth) -> QuickAddResult<Vec<BudgetCell>>;
}

/// Write side of the data engine
#[async_trait]
pub trait WriteApi: Send + Sync {
    /// Add all transactions of the batch, or none of them
    async fn batch_add(&self, batch: TransactionBatch) -> QuickAddResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = Query::table("transactions")
            .filter("payee", "p1")
            .order_by_desc("date")
            .limit(1)
            .select(["account", "category"]);

        assert_eq!(query.table, "transactions");
        assert_eq!(query.filter[0].field, "payee");
        assert_eq!(query.filter[0].value, Value::from("p1"));
        assert_eq!(query.order_by[0].direction, Direction::Desc);
        assert_eq!(query.select, vec!["account", "category"]);
    }

    #[test]
    fn test_query_serializes_declaratively() {
        let query = Query::table("transactions").order_by_asc("date");
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["order_by"][0]["direction"], "asc");
        assert_eq!(json["limit"], Value::Null);
    }
}
