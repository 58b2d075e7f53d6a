use rusqlite::{params, OptionalExtension, Row};
use subtyper_core::models::prediction::PredictionRecord;
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::{clamp_limit, Store};

const TABLE: &str = "predictions";

const COLUMNS: &str = "id, gad, hba1c, bmi, age, cpeptide, glucose, \
                       cluster_label, probabilities, medications, created_at";

/// Column values as SQLite hands them back, before parsing.
struct RawPrediction {
    id: String,
    gad: f64,
    hba1c: f64,
    bmi: f64,
    age: f64,
    cpeptide: f64,
    glucose: f64,
    cluster_label: String,
    probabilities: String,
    medications: Option<String>,
    created_at: String,
}

impl RawPrediction {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            gad: row.get(1)?,
            hba1c: row.get(2)?,
            bmi: row.get(3)?,
            age: row.get(4)?,
            cpeptide: row.get(5)?,
            glucose: row.get(6)?,
            cluster_label: row.get(7)?,
            probabilities: row.get(8)?,
            medications: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_record(self) -> Result<PredictionRecord, StorageError> {
        let corrupt = |reason: String| StorageError::CorruptRow {
            table: TABLE,
            reason,
        };

        Ok(PredictionRecord {
            id: Uuid::parse_str(&self.id).map_err(|e| corrupt(format!("id: {e}")))?,
            gad: self.gad,
            hba1c: self.hba1c,
            bmi: self.bmi,
            age: self.age,
            cpeptide: self.cpeptide,
            glucose: self.glucose,
            cluster_label: self
                .cluster_label
                .parse()
                .map_err(|e| corrupt(format!("cluster_label: {e}")))?,
            probabilities: serde_json::from_str(&self.probabilities)?,
            medications: self
                .medications
                .map(|m| serde_json::from_str(&m))
                .transpose()?,
            created_at: self
                .created_at
                .parse()
                .map_err(|e| corrupt(format!("created_at: {e}")))?,
        })
    }
}

impl Store {
    pub fn insert_prediction(&self, record: &PredictionRecord) -> Result<(), StorageError> {
        let probabilities = serde_json::to_string(&record.probabilities)?;
        let medications = record
            .medications
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn()?.execute(
            "INSERT INTO predictions (
                id, gad, hba1c, bmi, age, cpeptide, glucose,
                cluster_label, probabilities, medications, created_at, created_at_us
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.id.to_string(),
                record.gad,
                record.hba1c,
                record.bmi,
                record.age,
                record.cpeptide,
                record.glucose,
                record.cluster_label.label(),
                probabilities,
                medications,
                record.created_at.to_string(),
                record.created_at.as_microsecond(),
            ],
        )?;

        tracing::debug!(id = %record.id, cluster = %record.cluster_label, "stored prediction");
        Ok(())
    }

    /// Most recent first, at most `limit` (clamped to 1..=1000).
    pub fn list_predictions(&self, limit: usize) -> Result<Vec<PredictionRecord>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM predictions
             ORDER BY created_at_us DESC, rowid DESC
             LIMIT ?1"
        ))?;

        let raw = stmt
            .query_map(params![clamp_limit(limit)], RawPrediction::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        raw.into_iter().map(RawPrediction::into_record).collect()
    }

    pub fn get_prediction(&self, id: Uuid) -> Result<PredictionRecord, StorageError> {
        let raw = self
            .conn()?
            .query_row(
                &format!("SELECT {COLUMNS} FROM predictions WHERE id = ?1"),
                params![id.to_string()],
                RawPrediction::from_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::NotFound { id: id.to_string() })?;

        raw.into_record()
    }

    pub fn count_predictions(&self) -> Result<u64, StorageError> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
