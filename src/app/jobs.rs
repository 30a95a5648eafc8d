use crate::core::pipeline::AnalysisPipeline;
use crate::domain::model::{AnalysisRecord, Job, JobPayload, JobStatus};
use crate::domain::ports::{JobBroker, RecordStore, Storage, TextExtractor};
use crate::utils::error::{AnalyzerError, Result};
use uuid::Uuid;

/// Asynchronous intake: stage the bytes, enqueue, hand back the job id
/// without waiting for processing.
pub struct JobSubmitter<B: JobBroker, S: Storage> {
    broker: B,
    storage: S,
}

impl<B: JobBroker, S: Storage> JobSubmitter<B, S> {
    pub fn new(broker: B, storage: S) -> Self {
        Self { broker, storage }
    }

    pub async fn submit(&self, filename: &str, bytes: &[u8]) -> Result<Uuid> {
        let stored_path = format!("{}-{}", Uuid::new_v4(), filename);
        self.storage.write_file(&stored_path, bytes).await?;

        let id = self
            .broker
            .enqueue(JobPayload {
                stored_path,
                filename: filename.to_string(),
            })
            .await?;
        tracing::info!("📨 Queued job {} for {}", id, filename);
        Ok(id)
    }
}

/// Worker loop: claim one job at a time, execute it to a terminal status,
/// move on. Failures are recorded on the job and never retried.
pub struct Worker<B, S, E, R>
where
    B: JobBroker,
    S: Storage,
    E: TextExtractor,
    R: RecordStore,
{
    broker: B,
    storage: S,
    extractor: E,
    store: R,
    pipeline: AnalysisPipeline,
}

impl<B, S, E, R> Worker<B, S, E, R>
where
    B: JobBroker,
    S: Storage,
    E: TextExtractor,
    R: RecordStore,
{
    pub fn new(broker: B, storage: S, extractor: E, store: R, pipeline: AnalysisPipeline) -> Self {
        Self {
            broker,
            storage,
            extractor,
            store,
            pipeline,
        }
    }

    /// Runs until the broker reports the queue drained. Returns how many
    /// jobs this worker brought to a terminal status.
    pub async fn run(&self) -> Result<usize> {
        let mut processed = 0;

        while let Some(job) = self.broker.claim_next().await? {
            processed += 1;
            let outcome = self.process(&job).await;

            if let Err(e) = self.storage.remove_file(&job.payload.stored_path).await {
                tracing::warn!(
                    "Failed to discard staged upload {}: {}",
                    job.payload.stored_path,
                    e
                );
            }

            match outcome {
                Ok(record) => {
                    tracing::info!("✅ Job {} succeeded, record {}", job.id, record.id);
                    self.broker.complete(job.id, record.id).await?;
                }
                Err(e) => {
                    tracing::error!("❌ Job {} failed: {}", job.id, e);
                    self.broker.fail(job.id, e.to_string()).await?;
                }
            }
        }

        Ok(processed)
    }

    async fn process(&self, job: &Job) -> Result<AnalysisRecord> {
        let bytes = self.storage.read_file(&job.payload.stored_path).await?;
        let text = self.extractor.extract_text(&bytes)?;
        let result = self.pipeline.analyze(&text);
        self.store
            .create_record(&job.payload.filename, &result.summary, &result.markers)
            .await
    }
}

/// Resolve a job's outcome: the record id on success, the recorded reason
/// on failure, JobNotReady while in flight, JobNotFound for unknown ids.
pub async fn job_result<B: JobBroker>(broker: &B, id: Uuid) -> Result<i64> {
    match broker.status(id).await? {
        JobStatus::Succeeded { record_id } => Ok(record_id),
        JobStatus::Failed { reason } => Err(AnalyzerError::JobFailed { id, reason }),
        JobStatus::Queued | JobStatus::Running => Err(AnalyzerError::JobNotReady(id)),
    }
}
