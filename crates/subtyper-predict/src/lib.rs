//! subtyper-predict
//!
//! The prediction pipeline: coerce the six raw measurements, gate them on
//! their clinical ranges, derive the HOMA1 indices, assemble the classifier
//! row, run inference, and format the result.
//!
//! Every step is pure. Storage is the caller's concern.

pub mod coerce;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod validate;

pub use error::PredictError;
pub use pipeline::{predict, predict_input, run, Prediction};
