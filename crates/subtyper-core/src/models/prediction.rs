use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::cluster::Cluster;
use super::input::PredictionInput;

/// What the prediction endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResult {
    pub cluster_label: Cluster,
    /// One probability per cluster, in [`Cluster::ALL`] order, rounded to
    /// three decimals.
    pub probabilities: Vec<f64>,
}

/// A prediction as persisted, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub gad: f64,
    pub hba1c: f64,
    pub bmi: f64,
    pub age: f64,
    pub cpeptide: f64,
    pub glucose: f64,
    pub cluster_label: Cluster,
    pub probabilities: Vec<f64>,
    /// Medication list submitted alongside the measurements, stored verbatim.
    pub medications: Option<serde_json::Value>,
    pub created_at: jiff::Timestamp,
}

impl PredictionRecord {
    pub fn new(
        input: &PredictionInput,
        result: &PredictionResult,
        medications: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            gad: input.gad,
            hba1c: input.hba1c,
            bmi: input.bmi,
            age: input.age,
            cpeptide: input.cpeptide,
            glucose: input.glucose,
            cluster_label: result.cluster_label,
            probabilities: result.probabilities.clone(),
            medications,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn input(&self) -> PredictionInput {
        PredictionInput {
            gad: self.gad,
            hba1c: self.hba1c,
            bmi: self.bmi,
            age: self.age,
            cpeptide: self.cpeptide,
            glucose: self.glucose,
        }
    }
}
