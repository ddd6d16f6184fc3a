//! Storage layer for quick transaction entry
//!
//! Provides JSON file storage with atomic writes and a local data engine
//! that answers the entry form's queries and writes.

pub mod file_io;
pub mod local;
pub mod query;

pub use file_io::{read_json, write_json_atomic};
pub use local::LocalStore;
pub use query::evaluate;
