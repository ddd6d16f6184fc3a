//! Envelope QuickAdd - quick transaction entry for a personal budget
//!
//! This library implements the "add transaction" form of a budgeting
//! application: a draft that is validated as it is typed, auto-filled from
//! the payee's history, normalized into a transaction and submitted to the
//! data engine, followed by a report of the category's remaining budget.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and user settings
//! - `error`: Custom error types
//! - `models`: Drafts, transactions, reference entities and budget cells
//! - `services`: Form logic over injected query/write/reference interfaces
//! - `storage`: Local JSON data engine
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use quickadd::config::{QuickAddPaths, Settings};
//! use quickadd::storage::LocalStore;
//!
//! let paths = QuickAddPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = LocalStore::open(paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{QuickAddError, QuickAddResult};
