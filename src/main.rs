use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quickadd::cli::{
    handle_account_command, handle_budget_command, handle_transaction_command,
    AccountCommands, BudgetCommands, TransactionCommands,
};
use quickadd::config::{QuickAddPaths, Settings};
use quickadd::storage::LocalStore;

#[derive(Parser)]
#[command(
    name = "quickadd",
    version,
    about = "Quick transaction entry for an envelope budget",
    long_about = "Adds transactions to a local envelope budget. Choosing a payee \
                  fills in the account and category from its last transaction, \
                  and the category's remaining budget is reported after saving."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Budget month commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = QuickAddPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing QuickAdd at: {}", paths.data_dir().display());
            LocalStore::initialize(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default category groups and categories have been created:");
            println!("  - Bills (Rent/Mortgage, Electric, Water, Internet, Phone, Insurance)");
            println!("  - Needs (Groceries, Transportation, Medical, Household)");
            println!("  - Wants (Dining Out, Entertainment, Shopping, Subscriptions)");
            println!("  - Savings (Emergency Fund, Vacation, Large Purchases)");
            println!();
            println!("Run 'quickadd account add <name>' to create your first account.");
        }
        Some(Commands::Config) => {
            println!("QuickAdd Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:         {}", settings.currency_symbol);
            println!("  Date format:             {}", settings.date_format);
            println!(
                "  Report category balance: {}",
                settings.report_category_balance
            );
            println!(
                "  Autofill from history:   {}",
                settings.autofill_from_history
            );
        }
        Some(Commands::Account(cmd)) => {
            let store = LocalStore::open(paths)?;
            handle_account_command(&store, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            let store = LocalStore::open(paths)?;
            handle_budget_command(&store, &settings, cmd).await?;
        }
        Some(Commands::Transaction(cmd)) => {
            let store = Arc::new(LocalStore::open(paths)?);
            handle_transaction_command(store, &settings, cmd).await?;
        }
        None => {
            println!("QuickAdd - quick transaction entry for an envelope budget");
            println!();
            println!("Run 'quickadd --help' for usage information.");
        }
    }

    Ok(())
}
