//! Two cancer types side by side over the unfiltered dataset.
//!
//! The comparison curve counts a patient at month `m` when they are alive
//! *or* survived at least `m` months. Living patients are therefore treated
//! as surviving every mark, which overstates long-range survival for types
//! with many recent diagnoses.

use oncoreg_engine::{CancerType, PatientRecord};
use oncoreg_stats::{
    rate,
    survival::{self, ThresholdSurvivalCurve},
};
use serde::Serialize;

pub const CURVE_STEP_MONTHS: f64 = 10.0;
pub const CURVE_MAX_MONTHS: f64 = 120.0;

/// Summary of one cancer type over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub cancer_type: CancerType,
    pub count: usize,
    pub alive: usize,
    /// Alive share in percent, one decimal.
    pub survival_rate: f64,
    /// Mean of whole survival months, rounded.
    pub avg_months: u32,
    pub curve: ThresholdSurvivalCurve,
}

impl TypeSummary {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn compute(all: &[PatientRecord], cancer_type: CancerType) -> Self {
        let records = all
            .iter()
            .filter(|r| r.cancer_type() == cancer_type)
            .collect::<Vec<_>>();
        let count = records.len();
        let alive = records.iter().filter(|r| r.is_alive()).count();
        let avg = rate::mean_or_zero(records.iter().map(|r| r.whole_months()));

        let observations = records
            .iter()
            .map(|r| (r.whole_months(), r.is_alive()))
            .collect::<Vec<_>>();
        let marks = survival::month_marks(CURVE_STEP_MONTHS, CURVE_MAX_MONTHS);

        Self {
            cancer_type,
            count,
            alive,
            survival_rate: rate::round_to(rate::percentage(alive, count), 1),
            avg_months: rate::round_half_up(avg) as u32,
            curve: ThresholdSurvivalCurve::from_observations(&observations, &marks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub a: TypeSummary,
    pub b: TypeSummary,
    /// Type with the higher survival rate; `None` on a tie.
    pub winner: Option<CancerType>,
    /// Absolute survival-rate difference in percentage points, one decimal.
    pub rate_gap: f64,
    /// Absolute difference of the rounded average survivals.
    pub months_gap: u32,
}

impl ComparisonResult {
    /// One-line summary of the comparison.
    #[must_use]
    pub fn insight(&self) -> String {
        let headline = match self.winner {
            Some(winner) => format!(
                "{winner} shows {:.1}% higher survival rate.",
                self.rate_gap
            ),
            None => format!(
                "{} and {} show the same survival rate.",
                self.a.cancer_type, self.b.cancer_type
            ),
        };
        format!(
            "{headline} Average survival differs by {} months.",
            self.months_gap
        )
    }
}

/// Compares two cancer types over `all`.
///
/// Returns `None` when either side is unset or both name the same type.
///
/// ```
/// # use oncoreg_analysis::comparison::compare;
/// # use oncoreg_engine::CancerType;
/// assert!(compare(&[], Some(CancerType::Lung), None).is_none());
/// assert!(compare(&[], Some(CancerType::Lung), Some(CancerType::Lung)).is_none());
/// ```
#[must_use]
pub fn compare(
    all: &[PatientRecord],
    a: Option<CancerType>,
    b: Option<CancerType>,
) -> Option<ComparisonResult> {
    let (a, b) = (a?, b?);
    if a == b {
        return None;
    }
    let a = TypeSummary::compute(all, a);
    let b = TypeSummary::compute(all, b);

    let winner = match a.survival_rate.total_cmp(&b.survival_rate) {
        std::cmp::Ordering::Greater => Some(a.cancer_type),
        std::cmp::Ordering::Less => Some(b.cancer_type),
        std::cmp::Ordering::Equal => None,
    };
    let rate_gap = rate::round_to((a.survival_rate - b.survival_rate).abs(), 1);
    let months_gap = a.avg_months.abs_diff(b.avg_months);

    Some(ComparisonResult {
        a,
        b,
        winner,
        rate_gap,
        months_gap,
    })
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::{Stage, VitalStatus};

    use super::*;

    fn record(cancer_type: CancerType, status: VitalStatus, months: f64) -> PatientRecord {
        PatientRecord::new("x", cancer_type, Stage::StageII, status, months)
    }

    fn dataset() -> Vec<PatientRecord> {
        vec![
            record(CancerType::Breast, VitalStatus::Alive, 10.0),
            record(CancerType::Breast, VitalStatus::Alive, 30.0),
            record(CancerType::Colon, VitalStatus::Alive, 5.0),
            record(CancerType::Colon, VitalStatus::Deceased, 15.0),
            record(CancerType::Liver, VitalStatus::Deceased, 3.0),
        ]
    }

    #[test]
    fn test_compare_two_types() {
        let result = compare(&dataset(), Some(CancerType::Breast), Some(CancerType::Colon)).unwrap();
        assert_eq!(result.a.survival_rate, 100.0);
        assert_eq!(result.a.avg_months, 20);
        assert_eq!(result.b.survival_rate, 50.0);
        assert_eq!(result.b.avg_months, 10);
        assert_eq!(result.winner, Some(CancerType::Breast));
        assert_eq!(result.rate_gap, 50.0);
        assert_eq!(result.months_gap, 10);
        assert_eq!(
            result.insight(),
            "Breast shows 50.0% higher survival rate. Average survival differs by 10 months."
        );
    }

    #[test]
    fn test_unset_or_identical_types() {
        let all = dataset();
        assert!(compare(&all, None, Some(CancerType::Colon)).is_none());
        assert!(compare(&all, Some(CancerType::Colon), Some(CancerType::Colon)).is_none());
    }

    #[test]
    fn test_optimistic_curve() {
        let result = compare(&dataset(), Some(CancerType::Colon), Some(CancerType::Liver)).unwrap();
        let colon = &result.a.curve;
        assert_eq!(colon.points.len(), 13);
        // the living 5-month patient counts at every mark
        assert_eq!(colon.percent_at(10.0), Some(100.0));
        assert_eq!(colon.percent_at(20.0), Some(50.0));
        assert_eq!(colon.percent_at(120.0), Some(50.0));
        assert_eq!(result.b.curve.percent_at(10.0), Some(0.0));
    }

    #[test]
    fn test_fractional_months_are_truncated() {
        let all = [
            record(CancerType::Stomach, VitalStatus::Deceased, 9.9),
            record(CancerType::Stomach, VitalStatus::Deceased, 10.9),
            record(CancerType::Ovarian, VitalStatus::Deceased, 4.0),
        ];
        let result = compare(&all, Some(CancerType::Stomach), Some(CancerType::Ovarian)).unwrap();
        // 9 and 10 average to 9.5, rounded up
        assert_eq!(result.a.avg_months, 10);
        assert_eq!(result.a.curve.percent_at(10.0), Some(50.0));
    }

    #[test]
    fn test_tie_has_no_winner() {
        let all = [
            record(CancerType::Stomach, VitalStatus::Alive, 12.0),
            record(CancerType::Ovarian, VitalStatus::Alive, 20.0),
        ];
        let result = compare(&all, Some(CancerType::Stomach), Some(CancerType::Ovarian)).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.rate_gap, 0.0);
        assert!(result.insight().starts_with("Stomach and Ovarian show the same"));
    }

    #[test]
    fn test_type_without_patients() {
        let result = compare(&dataset(), Some(CancerType::Prostate), Some(CancerType::Breast)).unwrap();
        assert_eq!(result.a.count, 0);
        assert_eq!(result.a.survival_rate, 0.0);
        assert_eq!(result.a.avg_months, 0);
        assert!(result.a.curve.percents().iter().all(|&p| p == 0.0));
    }
}
