use crate::core::ranges::ReferenceTable;
use crate::domain::model::MarkerMap;

/// Returned instead of an empty summary when nothing was recognized.
pub const NO_MARKERS_SUMMARY: &str = "No common CBC markers detected in the document.";

pub const ASSESSMENT_DELIMITER: &str = " | ";

/// One assessment line per extracted marker, in map order, joined into a
/// single summary string. The marker map itself is left untouched for
/// persistence next to the summary.
pub fn compose_summary(markers: &MarkerMap, ranges: &ReferenceTable) -> String {
    if markers.is_empty() {
        return NO_MARKERS_SUMMARY.to_string();
    }

    markers
        .iter()
        .map(|(name, value)| ranges.assess(*name, *value))
        .collect::<Vec<_>>()
        .join(ASSESSMENT_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MarkerName;

    #[test]
    fn empty_map_yields_sentinel() {
        let summary = compose_summary(&MarkerMap::new(), &ReferenceTable::default());
        assert_eq!(summary, NO_MARKERS_SUMMARY);
    }

    #[test]
    fn lines_are_joined_with_delimiter() {
        let mut markers = MarkerMap::new();
        markers.insert(MarkerName::Wbc, 7.5);
        markers.insert(MarkerName::Platelets, 500.0);

        let summary = compose_summary(&markers, &ReferenceTable::default());
        let lines: Vec<&str> = summary.split(ASSESSMENT_DELIMITER).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("WBC is within the typical range"));
        assert!(lines[1].contains("Platelets is high"));
    }
}
