//! Patients per cancer type.

use std::collections::BTreeMap;

use oncoreg_engine::{CancerType, PatientRecord};
use oncoreg_stats::rate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CancerTypeShare {
    pub cancer_type: CancerType,
    pub count: usize,
    /// Share of the subset in percent, one decimal.
    pub percent: f64,
}

/// Count per cancer type present in the subset, in [`CancerType::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancerTypeDistribution {
    pub total: usize,
    pub entries: Vec<CancerTypeShare>,
}

impl CancerTypeDistribution {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let mut counts = BTreeMap::<CancerType, usize>::new();
        for record in records {
            *counts.entry(record.cancer_type()).or_default() += 1;
        }
        let total = records.len();
        let entries = counts
            .into_iter()
            .map(|(cancer_type, count)| CancerTypeShare {
                cancer_type,
                count,
                percent: rate::round_to(rate::percentage(count, total), 1),
            })
            .collect();
        Self { total, entries }
    }

    #[must_use]
    pub fn count(&self, cancer_type: CancerType) -> usize {
        self.entries
            .iter()
            .find(|e| e.cancer_type == cancer_type)
            .map_or(0, |e| e.count)
    }

    /// Most frequent type; the earliest type wins a tie.
    #[must_use]
    pub fn most_common(&self) -> Option<&CancerTypeShare> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|e| e.count)
    }

    /// Entries sorted by count, largest first.
    #[must_use]
    pub fn ranked(&self) -> Vec<CancerTypeShare> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::{Stage, VitalStatus};

    use super::*;

    fn record(cancer_type: CancerType) -> PatientRecord {
        PatientRecord::new("x", cancer_type, Stage::StageI, VitalStatus::Alive, 1.0)
    }

    #[test]
    fn test_counts_in_enum_order() {
        let records = [
            record(CancerType::Ovarian),
            record(CancerType::Breast),
            record(CancerType::Ovarian),
        ];
        let dist = CancerTypeDistribution::compute(&records);
        let types: Vec<_> = dist.entries.iter().map(|e| e.cancer_type).collect();
        assert_eq!(types, [CancerType::Breast, CancerType::Ovarian]);
        assert_eq!(dist.count(CancerType::Ovarian), 2);
        assert_eq!(dist.count(CancerType::Lung), 0);
        assert_eq!(dist.entries[1].percent, 66.7);
        assert_eq!(dist.most_common().unwrap().cancer_type, CancerType::Ovarian);
    }

    #[test]
    fn test_tie_prefers_earliest_type() {
        let records = [record(CancerType::Liver), record(CancerType::Lung)];
        let dist = CancerTypeDistribution::compute(&records);
        assert_eq!(dist.most_common().unwrap().cancer_type, CancerType::Lung);
    }

    #[test]
    fn test_empty() {
        let dist = CancerTypeDistribution::compute(&[]);
        assert!(dist.entries.is_empty());
        assert!(dist.most_common().is_none());
    }
}
