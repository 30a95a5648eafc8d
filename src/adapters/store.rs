use crate::domain::model::{AnalysisRecord, MarkerMap};
use crate::domain::ports::RecordStore;
use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

fn persistence_err(e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::Persistence {
        message: e.to_string(),
    }
}

/// Append-only JSON-lines store. Records are never updated in place, so
/// concurrent submissions only contend on the append itself.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
    next_id: Arc<Mutex<i64>>,
}

impl JsonlStore {
    /// Opens (or prepares to create) the store file, resuming the id
    /// sequence from the existing record count.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let next_id = match fs::read_to_string(&path) {
            Ok(contents) => contents.lines().filter(|l| !l.trim().is_empty()).count() as i64 + 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 1,
            Err(e) => return Err(persistence_err(e)),
        };
        Ok(Self {
            path,
            next_id: Arc::new(Mutex::new(next_id)),
        })
    }
}

#[async_trait]
impl RecordStore for JsonlStore {
    async fn create_record(
        &self,
        filename: &str,
        summary: &str,
        markers: &MarkerMap,
    ) -> Result<AnalysisRecord> {
        let mut next_id = self.next_id.lock().await;

        let record = AnalysisRecord {
            id: *next_id,
            filename: filename.to_string(),
            summary: summary.to_string(),
            markers: markers.clone(),
            created_at: Utc::now(),
        };
        let line = serde_json::to_string(&record).map_err(persistence_err)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(persistence_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(persistence_err)?;
        writeln!(file, "{line}").map_err(persistence_err)?;

        *next_id += 1;
        Ok(record)
    }

    async fn list_records(&self) -> Result<Vec<AnalysisRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence_err(e)),
        };

        let mut records = Vec::new();
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            records.push(serde_json::from_str(line).map_err(persistence_err)?);
        }
        records.reverse();
        Ok(records)
    }
}

/// In-memory store for tests and single-shot demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<AnalysisRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_record(
        &self,
        filename: &str,
        summary: &str,
        markers: &MarkerMap,
    ) -> Result<AnalysisRecord> {
        let mut records = self.records.lock().await;
        let record = AnalysisRecord {
            id: records.len() as i64 + 1,
            filename: filename.to_string(),
            summary: summary.to_string(),
            markers: markers.clone(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_records(&self) -> Result<Vec<AnalysisRecord>> {
        let records = self.records.lock().await;
        Ok(records.iter().rev().cloned().collect())
    }
}
