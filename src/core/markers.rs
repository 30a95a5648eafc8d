use crate::domain::model::{MarkerMap, MarkerName};
use once_cell::sync::Lazy;
use regex::Regex;

pub struct MarkerPattern {
    pub name: MarkerName,
    pub spellings: &'static [&'static str],
}

/// Recognition table. Scanned in declaration order; the output map keeps
/// that order for the markers that were found.
pub const RECOGNITION_TABLE: &[MarkerPattern] = &[
    MarkerPattern {
        name: MarkerName::Hemoglobin,
        spellings: &["Hemoglobin", "Hb"],
    },
    MarkerPattern {
        name: MarkerName::Rbc,
        spellings: &["RBC", "Red Blood Cells"],
    },
    MarkerPattern {
        name: MarkerName::Wbc,
        spellings: &["WBC", "White Blood Cells", "Leukocytes"],
    },
    MarkerPattern {
        name: MarkerName::Platelets,
        spellings: &["Platelets", "PLT"],
    },
    MarkerPattern {
        name: MarkerName::Hematocrit,
        spellings: &["Hematocrit", "HCT"],
    },
];

// Spelling alternation, optional ':' or '-' separator, integer-or-decimal
// literal. Case-insensitive over the whole pattern.
static COMPILED: Lazy<Vec<(MarkerName, Regex)>> = Lazy::new(|| {
    RECOGNITION_TABLE
        .iter()
        .map(|entry| {
            let alternation = entry
                .spellings
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)(?:{alternation})\s*[:\-]?\s*(\d+(?:\.\d+)?)");
            let regex = Regex::new(&pattern).expect("recognition table patterns are well-formed");
            (entry.name, regex)
        })
        .collect()
});

/// Scan `text` for every recognized marker and capture the first numeric
/// value per marker. Later occurrences are ignored; a value that fails to
/// parse leaves the marker absent. Never fails, even on empty input.
pub fn extract_markers(text: &str) -> MarkerMap {
    let mut found = MarkerMap::new();

    for (name, pattern) in COMPILED.iter() {
        let mut matches = pattern.captures_iter(text);
        let Some(first) = matches.next() else {
            continue;
        };
        if matches.next().is_some() {
            tracing::debug!("{name} occurs more than once, keeping the first value");
        }
        match first[1].parse::<f64>() {
            Ok(value) => {
                found.insert(*name, value);
            }
            Err(_) => {
                tracing::debug!("{name} matched but value {:?} is not numeric", &first[1]);
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_named_marker_with_colon() {
        let markers = extract_markers("Hemoglobin: 10.2");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[&MarkerName::Hemoglobin], 10.2);
    }

    #[test]
    fn extracts_aliases_case_insensitively() {
        let markers = extract_markers("hb - 13.1, red blood cells 4.5, LEUKOCYTES: 6");
        assert_eq!(markers[&MarkerName::Hemoglobin], 13.1);
        assert_eq!(markers[&MarkerName::Rbc], 4.5);
        assert_eq!(markers[&MarkerName::Wbc], 6.0);
    }

    #[test]
    fn empty_text_yields_empty_map() {
        assert!(extract_markers("").is_empty());
    }

    #[test]
    fn markerless_text_yields_empty_map() {
        let markers = extract_markers("Patient presents with mild fatigue. Follow up in 2 weeks.");
        assert!(markers.is_empty());
    }

    #[test]
    fn first_match_wins_per_marker() {
        let markers = extract_markers("WBC: 7.5 ... repeat WBC: 9.9");
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[&MarkerName::Wbc], 7.5);
    }

    #[test]
    fn output_order_follows_recognition_table() {
        // Document order is reversed on purpose.
        let markers = extract_markers("Platelets: 300, Hemoglobin: 14");
        let names: Vec<MarkerName> = markers.keys().copied().collect();
        assert_eq!(names, vec![MarkerName::Hemoglobin, MarkerName::Platelets]);
    }

    #[test]
    fn absent_marker_never_appears() {
        let markers = extract_markers("Hematocrit: 41.0");
        assert!(!markers.contains_key(&MarkerName::Platelets));
        assert_eq!(markers[&MarkerName::Hematocrit], 41.0);
    }

    #[test]
    fn integer_values_parse_as_floats() {
        let markers = extract_markers("Platelets 500");
        assert_eq!(markers[&MarkerName::Platelets], 500.0);
    }

    #[test]
    fn name_without_value_does_not_match() {
        let markers = extract_markers("Hemoglobin pending, WBC 8.0");
        assert!(!markers.contains_key(&MarkerName::Hemoglobin));
        assert_eq!(markers[&MarkerName::Wbc], 8.0);
    }
}
