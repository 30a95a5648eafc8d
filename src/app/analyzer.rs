use crate::core::pipeline::AnalysisPipeline;
use crate::domain::model::AnalysisRecord;
use crate::domain::ports::{RecordStore, Storage, TextExtractor};
use crate::utils::error::Result;
use uuid::Uuid;

/// Synchronous request path: stage the upload, run the pipeline, persist
/// the record, return it in the same call.
pub struct Analyzer<S: Storage, E: TextExtractor, R: RecordStore> {
    storage: S,
    extractor: E,
    store: R,
    pipeline: AnalysisPipeline,
}

impl<S: Storage, E: TextExtractor, R: RecordStore> Analyzer<S, E, R> {
    pub fn new(storage: S, extractor: E, store: R, pipeline: AnalysisPipeline) -> Self {
        Self {
            storage,
            extractor,
            store,
            pipeline,
        }
    }

    /// On failure nothing is persisted. The staged copy of the upload is
    /// discarded on every exit path; a cleanup failure is logged and never
    /// masks the primary outcome.
    pub async fn analyze_upload(&self, filename: &str, bytes: &[u8]) -> Result<AnalysisRecord> {
        let staged = format!("{}-{}", Uuid::new_v4(), filename);
        self.storage.write_file(&staged, bytes).await?;

        let outcome = self.run_staged(&staged, filename).await;

        if let Err(e) = self.storage.remove_file(&staged).await {
            tracing::warn!("Failed to discard staged upload {}: {}", staged, e);
        }
        outcome
    }

    async fn run_staged(&self, staged: &str, filename: &str) -> Result<AnalysisRecord> {
        let bytes = self.storage.read_file(staged).await?;
        let text = self.extractor.extract_text(&bytes)?;
        let result = self.pipeline.analyze(&text);

        tracing::debug!(
            "Extracted {} markers from {}",
            result.markers.len(),
            filename
        );
        self.store
            .create_record(filename, &result.summary, &result.markers)
            .await
    }
}
