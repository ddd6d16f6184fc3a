//! Budget CLI commands
//!
//! Reads and sets the per-category leftover cells of a budget month.

use clap::Subcommand;

use super::{parse_signed_amount, resolve_category};
use crate::config::Settings;
use crate::error::{QuickAddError, QuickAddResult};
use crate::models::{find_leftover, BudgetMonth};
use crate::services::{Clock, QueryApi, SystemClock};
use crate::storage::LocalStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a category's leftover amount for a month
    SetLeftover {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "250.00", or "-5.00" when overspent)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show a category's leftover amount for a month
    Leftover {
        /// Category name or ID
        category: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn resolve_month(month: Option<&str>) -> QuickAddResult<BudgetMonth> {
    match month {
        Some(text) => BudgetMonth::parse(text).ok_or_else(|| {
            QuickAddError::Validation(format!("Invalid month '{}'. Use YYYY-MM", text))
        }),
        None => Ok(BudgetMonth::containing(SystemClock.today())),
    }
}

/// Handle a budget command
pub async fn handle_budget_command(
    store: &LocalStore,
    settings: &Settings,
    cmd: BudgetCommands,
) -> QuickAddResult<()> {
    match cmd {
        BudgetCommands::SetLeftover {
            category,
            amount,
            month,
        } => {
            let category = resolve_category(store, &category)?;
            let value = parse_signed_amount(&amount)?;
            let month = resolve_month(month.as_deref())?;

            store.set_leftover(month, &category.id, value)?;
            println!(
                "{} leftover for {}: {}",
                category.name,
                month,
                value.format_with_symbol(&settings.currency_symbol)
            );
        }

        BudgetCommands::Leftover { category, month } => {
            let category = resolve_category(store, &category)?;
            let month = resolve_month(month.as_deref())?;

            let cells = store.budget_month(month).await?;
            match find_leftover(&cells, month, &category.id) {
                Some(value) => println!(
                    "{} leftover for {}: {}",
                    category.name,
                    month,
                    value.format_with_symbol(&settings.currency_symbol)
                ),
                None => println!("{} has no budget for {}", category.name, month),
            }
        }
    }

    Ok(())
}
