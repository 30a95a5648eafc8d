use crate::domain::model::{AnalysisRecord, Job, JobPayload, JobStatus, MarkerMap};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Staging area for uploaded document bytes.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Document-to-text collaborator. Pure: same bytes, same text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Append-only persistence for completed analyses.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(
        &self,
        filename: &str,
        summary: &str,
        markers: &MarkerMap,
    ) -> Result<AnalysisRecord>;

    /// Most recent first.
    async fn list_records(&self) -> Result<Vec<AnalysisRecord>>;
}

/// Queue collaborator. Delivery is exclusive: a claimed job is never
/// handed to a second worker.
#[async_trait]
pub trait JobBroker: Send + Sync {
    async fn enqueue(&self, payload: JobPayload) -> Result<Uuid>;

    /// Claim the next queued job, marking it Running. Returns `None` once
    /// intake is closed and the queue has drained.
    async fn claim_next(&self) -> Result<Option<Job>>;

    async fn complete(&self, id: Uuid, record_id: i64) -> Result<()>;
    async fn fail(&self, id: Uuid, reason: String) -> Result<()>;

    /// Point-in-time status read. Unknown ids are a JobNotFound error.
    async fn status(&self, id: Uuid) -> Result<JobStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn upload_dir(&self) -> &str;
    fn records_path(&self) -> &str;
    fn worker_count(&self) -> usize;
}
