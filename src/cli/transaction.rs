//! Transaction CLI commands
//!
//! `add` drives the same draft session the entry form uses: the payee is
//! chosen first so its history can fill in the account and category, and
//! explicit flags always take precedence over those suggestions.

use std::sync::Arc;

use clap::Subcommand;
use tracing::debug;

use super::{resolve_account, resolve_category};
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_row, PrintingSink};
use crate::error::{QuickAddError, QuickAddResult};
use crate::services::{AppContext, DraftSession, EntryOptions, SystemClock};
use crate::storage::LocalStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount without sign (e.g., "19.99"); expenses unless --income
        #[arg(short, long)]
        amount: String,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Account name or ID
        #[arg(short = 'A', long)]
        account: Option<String>,
        /// Payee name (created if new)
        #[arg(short, long)]
        payee: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Fields of an `add` command
struct AddInput {
    amount: String,
    income: bool,
    account: Option<String>,
    payee: Option<String>,
    category: Option<String>,
    date: Option<String>,
    notes: Option<String>,
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    store: Arc<LocalStore>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> QuickAddResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            income,
            account,
            payee,
            category,
            date,
            notes,
        } => {
            let input = AddInput {
                amount,
                income,
                account,
                payee,
                category,
                date,
                notes,
            };
            add_transaction(store, settings, input).await
        }

        TransactionCommands::List { limit } => {
            let transactions = store.transactions()?;
            if transactions.is_empty() {
                println!("No transactions found.");
                return Ok(());
            }
            for txn in transactions.iter().take(limit) {
                println!(
                    "{}",
                    format_transaction_row(txn, store.as_ref(), &settings.currency_symbol)
                );
            }
            Ok(())
        }
    }
}

async fn add_transaction(
    store: Arc<LocalStore>,
    settings: &Settings,
    input: AddInput,
) -> QuickAddResult<()> {
    let ctx = AppContext {
        references: store.clone(),
        notifications: Arc::new(PrintingSink),
        queries: store.clone(),
        writer: store.clone(),
        clock: Arc::new(SystemClock),
        options: EntryOptions::from(settings),
    };
    let session = DraftSession::new(ctx);

    if !session.set_amount_text(&input.amount)? {
        return Err(QuickAddError::Validation(format!(
            "Invalid amount: '{}'. Use digits with at most one decimal point",
            input.amount
        )));
    }
    session.set_expense(!input.income)?;

    if let Some(date) = &input.date {
        session.set_date_text(date)?;
    }
    if let Some(notes) = &input.notes {
        session.set_notes(notes)?;
    }

    if let Some(name) = &input.payee {
        let payee = store.get_or_create_payee(name)?;
        session.select_payee(Some(payee.id))?;
    }
    if let Some(text) = &input.account {
        let account = resolve_account(store.as_ref(), text)?;
        session.set_account(Some(account.id))?;
    }
    if let Some(text) = &input.category {
        let category = resolve_category(store.as_ref(), text)?;
        session.set_category(Some(category.id))?;
    }

    session.wait_for_autofill().await;
    debug!(draft = ?session.display_names(), "submitting draft");

    let outcome = session.submit().await?;

    print!(
        "{}",
        format_transaction_details(
            &outcome.transaction,
            store.as_ref(),
            &settings.currency_symbol,
            &settings.date_format,
        )
    );
    let account = resolve_account(store.as_ref(), outcome.navigate_to.as_str())?;
    println!("Open account: {}", account.name);

    Ok(())
}
