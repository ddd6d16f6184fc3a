//! Application context injected into the entry form

use std::sync::Arc;

use super::api::{QueryApi, WriteApi};
use super::clock::Clock;
use super::notify::NotificationSink;
use super::reference::ReferenceCache;
use crate::config::Settings;

/// Behaviour switches for the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryOptions {
    /// Look up the category's leftover budget after saving
    pub report_category_balance: bool,
    /// Fill account/category from the payee's last transaction
    pub autofill_from_history: bool,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            report_category_balance: true,
            autofill_from_history: true,
        }
    }
}

impl From<&Settings> for EntryOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            report_category_balance: settings.report_category_balance,
            autofill_from_history: settings.autofill_from_history,
        }
    }
}

/// Collaborators shared by every form session
#[derive(Clone)]
pub struct AppContext {
    pub references: Arc<dyn ReferenceCache>,
    pub notifications: Arc<dyn NotificationSink>,
    pub queries: Arc<dyn QueryApi>,
    pub writer: Arc<dyn WriteApi>,
    pub clock: Arc<dyn Clock>,
    pub options: EntryOptions,
}
