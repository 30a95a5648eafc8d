use crate::domain::model::MarkerName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Closed interval: both bounds classify as normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Low,
    Normal,
    High,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    ranges: IndexMap<MarkerName, ReferenceRange>,
}

impl Default for ReferenceTable {
    /// Illustrative adult ranges, not clinically validated.
    fn default() -> Self {
        let mut ranges = IndexMap::new();
        ranges.insert(MarkerName::Hemoglobin, ReferenceRange::new(12.0, 17.5));
        ranges.insert(MarkerName::Rbc, ReferenceRange::new(4.2, 6.1));
        ranges.insert(MarkerName::Wbc, ReferenceRange::new(4.0, 11.0));
        ranges.insert(MarkerName::Platelets, ReferenceRange::new(150.0, 450.0));
        ranges.insert(MarkerName::Hematocrit, ReferenceRange::new(36.0, 50.0));
        Self { ranges }
    }
}

impl ReferenceTable {
    pub fn empty() -> Self {
        Self {
            ranges: IndexMap::new(),
        }
    }

    pub fn range(&self, name: MarkerName) -> Option<ReferenceRange> {
        self.ranges.get(&name).copied()
    }

    pub fn set_range(&mut self, name: MarkerName, range: ReferenceRange) {
        self.ranges.insert(name, range);
    }

    pub fn classify(&self, name: MarkerName, value: f64) -> Classification {
        match self.range(name) {
            None => Classification::Unclassified,
            Some(range) if value < range.low => Classification::Low,
            Some(range) if value > range.high => Classification::High,
            Some(_) => Classification::Normal,
        }
    }

    /// One human-readable assessment line, with guidance for out-of-range
    /// values and a bare echo for markers without a known range.
    pub fn assess(&self, name: MarkerName, value: f64) -> String {
        match self.classify(name, value) {
            Classification::Low => {
                format!("{name} is low ({value}); consider evaluation for deficiency or anemia.")
            }
            Classification::High => {
                format!("{name} is high ({value}); consider clinical correlation.")
            }
            Classification::Normal => {
                format!("{name} is within the typical range ({value}).")
            }
            Classification::Unclassified => format!("{name}: {value}"),
        }
    }
}
