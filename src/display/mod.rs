//! Display formatting for terminal output
//!
//! Renders notifications and stored transactions for the command line.

pub mod notification;
pub mod transaction;

pub use notification::{format_notification, PrintingSink};
pub use transaction::{format_transaction_details, format_transaction_row};
