//! subtyper-core
//!
//! Pure domain types shared by every crate: clinical inputs, the classifier's
//! feature schema, cluster labels, and the stored record shapes.
//! No model, database, or HTTP dependency.

pub mod error;
pub mod models;
