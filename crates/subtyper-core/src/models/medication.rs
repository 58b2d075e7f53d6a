use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A medication-change submission, optionally tied to an earlier prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MedicationChange {
    pub id: Uuid,
    pub prediction_id: Option<Uuid>,
    /// Opaque to the service; stored and returned as submitted.
    pub medications: serde_json::Value,
    pub created_at: jiff::Timestamp,
}

/// Request body for recording a medication change.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMedicationChange {
    #[serde(default)]
    pub prediction_id: Option<Uuid>,
    pub medications: serde_json::Value,
}

impl MedicationChange {
    pub fn new(request: NewMedicationChange) -> Self {
        Self {
            id: Uuid::new_v4(),
            prediction_id: request.prediction_id,
            medications: request.medications,
            created_at: jiff::Timestamp::now(),
        }
    }
}
