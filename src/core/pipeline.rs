use crate::core::assessment::compose_summary;
use crate::core::markers::extract_markers;
use crate::core::ranges::ReferenceTable;
use crate::domain::model::AnalysisResult;

/// Extraction-and-assessment pipeline over already-extracted text.
/// Pure computation: no I/O, no locking, safe to share across workers.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    ranges: ReferenceTable,
}

impl AnalysisPipeline {
    pub fn new(ranges: ReferenceTable) -> Self {
        Self { ranges }
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let markers = extract_markers(text);
        let summary = compose_summary(&markers, &self.ranges);
        AnalysisResult { summary, markers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assessment::NO_MARKERS_SUMMARY;
    use crate::domain::model::MarkerName;

    #[test]
    fn same_text_yields_same_result() {
        let pipeline = AnalysisPipeline::default();
        let text = "Hemoglobin: 13.2, WBC 7.5, Platelets: 320";
        assert_eq!(pipeline.analyze(text), pipeline.analyze(text));
    }

    #[test]
    fn low_hemoglobin_end_to_end() {
        let pipeline = AnalysisPipeline::default();
        let result = pipeline.analyze("Hemoglobin: 10.2");
        assert_eq!(result.markers.len(), 1);
        assert_eq!(result.markers[&MarkerName::Hemoglobin], 10.2);
        assert!(result.summary.contains("low"));
    }

    #[test]
    fn mixed_classifications_end_to_end() {
        let pipeline = AnalysisPipeline::default();
        let result = pipeline.analyze("WBC 7.5, Platelets: 500");
        assert_eq!(result.markers[&MarkerName::Wbc], 7.5);
        assert_eq!(result.markers[&MarkerName::Platelets], 500.0);
        assert!(result.summary.contains("WBC is within the typical range"));
        assert!(result.summary.contains("Platelets is high"));
    }

    #[test]
    fn unrecognizable_text_end_to_end() {
        let pipeline = AnalysisPipeline::default();
        let result = pipeline.analyze("Lorem ipsum dolor sit amet.");
        assert!(result.markers.is_empty());
        assert_eq!(result.summary, NO_MARKERS_SUMMARY);
    }
}
