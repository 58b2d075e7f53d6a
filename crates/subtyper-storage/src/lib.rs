//! subtyper-storage
//!
//! SQLite persistence for prediction records and medication changes.
//! Every write is a single-row insert.

pub mod error;
pub mod medications;
pub mod predictions;
pub mod store;

pub use error::StorageError;
pub use store::Store;
