//! subtyper-model
//!
//! Loads the pre-trained subtype classifier from its JSON artifact and runs
//! single-row inference. The loaded [`Model`] is immutable; share it behind an
//! `Arc` and call it from any thread.

pub mod artifact;
pub mod classifier;
pub mod error;
pub mod forest;
pub mod linear;
pub mod model;
pub mod scaler;

pub use classifier::Classifier;
pub use error::ModelError;
pub use model::{load, Model};
