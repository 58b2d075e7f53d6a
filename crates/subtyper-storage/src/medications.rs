use rusqlite::{params, Row};
use subtyper_core::models::medication::MedicationChange;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::{clamp_limit, Store};

const TABLE: &str = "medication_changes";

struct RawMedicationChange {
    id: String,
    prediction_id: Option<String>,
    medications: String,
    created_at: String,
}

impl RawMedicationChange {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            prediction_id: row.get(1)?,
            medications: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_change(self) -> Result<MedicationChange, StorageError> {
        let corrupt = |reason: String| StorageError::CorruptRow {
            table: TABLE,
            reason,
        };
        let parse_id = |s: &str, column: &str| {
            Uuid::parse_str(s).map_err(|e| corrupt(format!("{column}: {e}")))
        };

        Ok(MedicationChange {
            id: parse_id(&self.id, "id")?,
            prediction_id: self
                .prediction_id
                .as_deref()
                .map(|p| parse_id(p, "prediction_id"))
                .transpose()?,
            medications: serde_json::from_str(&self.medications)?,
            created_at: self
                .created_at
                .parse()
                .map_err(|e| corrupt(format!("created_at: {e}")))?,
        })
    }
}

impl Store {
    pub fn insert_medication_change(&self, change: &MedicationChange) -> Result<(), StorageError> {
        let medications = serde_json::to_string(&change.medications)?;

        self.conn()?.execute(
            "INSERT INTO medication_changes (
                id, prediction_id, medications, created_at, created_at_us
            ) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                change.id.to_string(),
                change.prediction_id.map(|id| id.to_string()),
                medications,
                change.created_at.to_string(),
                change.created_at.as_microsecond(),
            ],
        )?;

        tracing::debug!(id = %change.id, "stored medication change");
        Ok(())
    }

    /// Most recent first, at most `limit` (clamped to 1..=1000).
    pub fn list_medication_changes(
        &self,
        limit: usize,
    ) -> Result<Vec<MedicationChange>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, prediction_id, medications, created_at FROM medication_changes
             ORDER BY created_at_us DESC, rowid DESC
             LIMIT ?1",
        )?;

        let raw = stmt
            .query_map(params![clamp_limit(limit)], RawMedicationChange::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter().map(RawMedicationChange::into_change).collect()
    }
}
