pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{
    fetch_remote_document, JsonlStore, LocalStorage, MemoryBroker, MemoryStore, PlainTextExtractor,
};
pub use crate::app::analyzer::Analyzer;
pub use crate::app::jobs::{job_result, JobSubmitter, Worker};
pub use crate::core::pipeline::AnalysisPipeline;
pub use crate::core::ranges::{Classification, ReferenceRange, ReferenceTable};
pub use crate::domain::model::{
    AnalysisRecord, AnalysisResult, Job, JobPayload, JobStatus, MarkerMap, MarkerName,
};
pub use crate::utils::error::{AnalyzerError, Result};
