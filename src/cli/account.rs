//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::error::QuickAddResult;
use crate::services::ReferenceCache;
use crate::storage::LocalStore;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Add {
        /// Account name
        name: String,
    },
    /// List all accounts
    List {
        /// Show closed accounts
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(store: &LocalStore, cmd: AccountCommands) -> QuickAddResult<()> {
    match cmd {
        AccountCommands::Add { name } => {
            let account = store.add_account(&name)?;
            println!("Created account: {}", account.name);
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { all } => {
            let accounts: Vec<_> = store
                .accounts()
                .into_iter()
                .filter(|a| all || !a.closed)
                .collect();

            if accounts.is_empty() {
                println!("No accounts found.");
            }
            for account in accounts {
                let marker = if account.closed { " (closed)" } else { "" };
                println!("{:36}  {}{}", account.id, account.name, marker);
            }
        }
    }

    Ok(())
}
