//! Age at diagnosis, per cancer type and age group.

use oncoreg_engine::{AgeGroup, CancerType, PatientRecord};
use oncoreg_stats::rate;
use serde::Serialize;

/// Why the age view has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum NoAgeData {
    /// The loaded dataset carries no ages at all.
    Dataset,
    /// The dataset has ages but none of the filtered records do.
    Filters,
}

impl NoAgeData {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            NoAgeData::Dataset => "Age data is unavailable for this dataset.",
            NoAgeData::Filters => "No age data is available for the current filters.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBandRow {
    pub cancer_type: CancerType,
    /// Counts in [`AgeGroup::ALL`] order.
    pub counts: [usize; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBandShare {
    pub group: AgeGroup,
    pub count: usize,
    /// Whole percent of all records with an age.
    pub percent: u32,
    /// Tooltip text such as `12 patients`.
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBandDistribution {
    /// Set when there is nothing to chart; `rows` is then empty and every
    /// share is `0%`.
    pub no_data: Option<NoAgeData>,
    pub rows: Vec<AgeBandRow>,
    pub shares: [AgeBandShare; 4],
    pub grand_total: usize,
}

impl AgeBandDistribution {
    /// Builds the distribution. `dataset_has_ages` tells the two empty
    /// states apart.
    #[must_use]
    pub fn compute(records: &[PatientRecord], dataset_has_ages: bool) -> Self {
        let types = CancerType::sorted_by_label(records.iter().map(PatientRecord::cancer_type));

        let mut rows = types
            .into_iter()
            .map(|cancer_type| AgeBandRow {
                cancer_type,
                counts: [0; 4],
            })
            .collect::<Vec<_>>();
        let mut group_totals = [0; 4];
        for record in records {
            let Some(group) = record.age_group() else {
                continue;
            };
            if let Some(row) = rows.iter_mut().find(|r| r.cancer_type == record.cancer_type()) {
                row.counts[group.index()] += 1;
            }
            group_totals[group.index()] += 1;
        }
        let grand_total = group_totals.iter().sum::<usize>();

        let no_data = if !dataset_has_ages {
            Some(NoAgeData::Dataset)
        } else if grand_total == 0 {
            Some(NoAgeData::Filters)
        } else {
            None
        };
        if no_data.is_some() {
            return Self {
                no_data,
                rows: vec![],
                shares: AgeGroup::ALL.map(|group| share(group, 0, 0)),
                grand_total: 0,
            };
        }

        Self {
            no_data,
            rows,
            shares: AgeGroup::ALL.map(|group| share(group, group_totals[group.index()], grand_total)),
            grand_total,
        }
    }

    #[must_use]
    pub fn share(&self, group: AgeGroup) -> &AgeBandShare {
        &self.shares[group.index()]
    }
}

fn share(group: AgeGroup, count: usize, grand_total: usize) -> AgeBandShare {
    AgeBandShare {
        group,
        count,
        percent: rate::rounded_percentage(count, grand_total),
        annotation: format!("{count} patients"),
    }
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::{Stage, VitalStatus};

    use super::*;

    fn record(cancer_type: CancerType, age: Option<f64>) -> PatientRecord {
        PatientRecord::new("x", cancer_type, Stage::StageII, VitalStatus::Alive, 10.0).with_age(age)
    }

    #[test]
    fn test_one_per_band() {
        let records = [
            record(CancerType::Breast, Some(25.0)),
            record(CancerType::Breast, Some(45.0)),
            record(CancerType::Colon, Some(65.0)),
            record(CancerType::Colon, Some(85.0)),
            record(CancerType::Colon, None),
        ];
        let dist = AgeBandDistribution::compute(&records, true);
        assert_eq!(dist.no_data, None);
        assert_eq!(dist.grand_total, 4);
        for share in &dist.shares {
            assert_eq!(share.count, 1);
            assert_eq!(share.percent, 25);
            assert_eq!(share.annotation, "1 patients");
        }
        assert_eq!(dist.rows[0].counts, [1, 1, 0, 0]);
        assert_eq!(dist.rows[1].counts, [0, 0, 1, 1]);
    }

    #[test]
    fn test_rows_sorted_by_label() {
        let records = [
            record(CancerType::Stomach, Some(40.0)),
            record(CancerType::Lung, Some(60.0)),
            record(CancerType::Liver, Some(75.0)),
        ];
        let dist = AgeBandDistribution::compute(&records, true);
        let types: Vec<_> = dist.rows.iter().map(|r| r.cancer_type).collect();
        assert_eq!(types, [CancerType::Liver, CancerType::Lung, CancerType::Stomach]);
        assert_eq!(dist.rows[0].counts, [0, 0, 0, 1]);
    }

    #[test]
    fn test_dataset_without_ages() {
        let records = [record(CancerType::Breast, None)];
        let dist = AgeBandDistribution::compute(&records, false);
        assert_eq!(dist.no_data, Some(NoAgeData::Dataset));
        assert!(dist.rows.is_empty());
        assert!(dist.shares.iter().all(|s| s.percent == 0 && s.annotation == "0 patients"));
    }

    #[test]
    fn test_filters_without_ages() {
        let records = [record(CancerType::Breast, None)];
        let dist = AgeBandDistribution::compute(&records, true);
        assert_eq!(dist.no_data, Some(NoAgeData::Filters));
        assert_eq!(dist.share(AgeGroup::From71).percent, 0);

        let dist = AgeBandDistribution::compute(&[], true);
        assert!(dist.no_data.is_some_and(|n| n.is_filters()));
    }
}
