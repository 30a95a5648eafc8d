pub mod assessment;
pub mod markers;
pub mod pipeline;
pub mod ranges;

pub use crate::domain::model::{AnalysisRecord, AnalysisResult, MarkerMap, MarkerName};
pub use crate::domain::ports::{ConfigProvider, JobBroker, RecordStore, Storage, TextExtractor};
pub use crate::utils::error::Result;
