use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The six clinical measurements submitted for one prediction.
///
/// Values are unvalidated here; range gating happens in the prediction
/// pipeline before any feature is derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionInput {
    /// GAD autoantibody status, 0 (negative) or 1 (positive).
    pub gad: f64,
    /// HbA1c, percent.
    pub hba1c: f64,
    /// Body mass index, kg/m2.
    pub bmi: f64,
    /// Age at diagnosis, years.
    pub age: f64,
    /// C-peptide, nmol/L.
    pub cpeptide: f64,
    /// Fasting glucose, mmol/L.
    pub glucose: f64,
}
