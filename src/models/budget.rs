//! Budget month model
//!
//! A budget month is exposed by the data engine as a flat list of named
//! cells. Cell names are synthesized from the month and an entity id, e.g.
//! `budget202403!leftover-cat123` holds the leftover amount of category
//! `cat123` in March 2024.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// A calendar month, displayed as zero-padded `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BudgetMonth {
    year: i32,
    month: u32,
}

impl BudgetMonth {
    /// The month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").ok()?;
        Some(Self::containing(date))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month without its dash, as used inside cell names (`YYYYMM`)
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Name of the cell holding a category's leftover amount for this month
    pub fn leftover_cell_name(&self, category_id: &CategoryId) -> String {
        format!("budget{}!leftover-{}", self.compact(), category_id)
    }
}

impl fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One named value of a budget month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCell {
    pub name: String,
    /// Amount in minor units
    pub value: Money,
}

impl BudgetCell {
    pub fn new(name: impl Into<String>, value: Money) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Find the leftover amount for a category among a month's cells
pub fn find_leftover(
    cells: &[BudgetCell],
    month: BudgetMonth,
    category_id: &CategoryId,
) -> Option<Money> {
    let name = month.leftover_cell_name(category_id);
    cells.iter().find(|c| c.name == name).map(|c| c.value)
}
