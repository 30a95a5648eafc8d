use crate::domain::ports::TextExtractor;
use crate::utils::error::{AnalyzerError, Result};

/// Document-to-text for plain-text uploads: strict UTF-8, nothing else.
/// Binary formats (PDF and friends) belong behind their own adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| AnalyzerError::DocumentFormat {
            reason: format!("not valid UTF-8 text: {e}"),
        })
    }
}
