use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of recognized CBC markers. Not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerName {
    Hemoglobin,
    #[serde(rename = "RBC")]
    Rbc,
    #[serde(rename = "WBC")]
    Wbc,
    Platelets,
    Hematocrit,
}

impl MarkerName {
    pub const ALL: [MarkerName; 5] = [
        MarkerName::Hemoglobin,
        MarkerName::Rbc,
        MarkerName::Wbc,
        MarkerName::Platelets,
        MarkerName::Hematocrit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerName::Hemoglobin => "Hemoglobin",
            MarkerName::Rbc => "RBC",
            MarkerName::Wbc => "WBC",
            MarkerName::Platelets => "Platelets",
            MarkerName::Hematocrit => "Hematocrit",
        }
    }
}

impl fmt::Display for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted readings in recognition-table order. At most one value per marker.
pub type MarkerMap = IndexMap<MarkerName, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub markers: MarkerMap,
}

/// A persisted analysis. Id and timestamp are assigned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub filename: String,
    pub summary: String,
    pub markers: MarkerMap,
    pub created_at: DateTime<Utc>,
}

/// Input reference carried through the queue: where the staged bytes live
/// plus the originating filename for provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    pub stored_path: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Succeeded { record_id: i64 },
    Failed { reason: String },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded { .. } | JobStatus::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub payload: JobPayload,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
}
