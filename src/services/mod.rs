//! Service layer for quick transaction entry
//!
//! The service layer holds the form's business logic on top of injected
//! collaborators: the data engine's query and write APIs, the reference
//! cache, the notification sink and the clock.

pub mod api;
pub mod autofill;
pub mod balance;
pub mod clock;
pub mod context;
pub mod notify;
pub mod reference;
pub mod session;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{Direction, Filter, OrderBy, Query, QueryApi, QueryResult, WriteApi};
pub use autofill::{payee_history_query, suggest_for_payee, PayeeSuggestion};
pub use balance::category_balance;
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{AppContext, EntryOptions};
pub use notify::{Notification, NotificationKind, NotificationSink, RecordingSink};
pub use reference::{InMemoryReferenceCache, ReferenceCache};
pub use session::{DraftDisplay, DraftSession};
pub use submit::{SubmitOutcome, TransactionSubmitter, ADDED_MESSAGE};
