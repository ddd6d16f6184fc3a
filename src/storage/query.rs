//! Query evaluation over JSON rows
//!
//! Applies a declarative [`Query`] to rows held in memory: equality filters,
//! a stable multi-key sort, a row limit and field projection.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::services::{Direction, Query};

/// Evaluate a query's filter, order, limit and projection over rows
pub fn evaluate(query: &Query, rows: Vec<Value>) -> Vec<Value> {
    let mut rows: Vec<Value> = rows
        .into_iter()
        .filter(|row| {
            query
                .filter
                .iter()
                .all(|f| field(row, &f.field) == &f.value)
        })
        .collect();

    if !query.order_by.is_empty() {
        rows.sort_by(|a, b| {
            query
                .order_by
                .iter()
                .map(|o| {
                    let ord = compare_values(field(a, &o.field), field(b, &o.field));
                    match o.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }

    if query.select.is_empty() {
        return rows;
    }

    rows.into_iter()
        .map(|row| {
            let projected: Map<String, Value> = query
                .select
                .iter()
                .map(|name| (name.clone(), field(&row, name).clone()))
                .collect();
            Value::Object(projected)
        })
        .collect()
}

/// A row's field, with missing fields read as null
fn field<'a>(row: &'a Value, name: &str) -> &'a Value {
    row.get(name).unwrap_or(&Value::Null)
}

/// Order values: nulls first, then booleans, numbers and strings
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
