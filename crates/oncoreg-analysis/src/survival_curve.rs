//! Threshold survival curve of the filtered subset and landmark rates.
//!
//! The curve is not a Kaplan-Meier estimate: the value at month `m` is simply
//! the share of the subset whose recorded survival is at least `m`.

use oncoreg_engine::{PatientRecord, SurvivalLandmark};
use oncoreg_stats::{
    rate,
    survival::{self, SurvivalPoint, ThresholdSurvivalCurve},
};
use serde::Serialize;

/// Spacing of the curve's month marks.
pub const MARK_STEP_MONTHS: f64 = 12.0;

/// Minimum upper end of the month axis.
pub const MIN_AXIS_MONTHS: f64 = 120.0;

/// Maximum upper end of the month axis. Longer survivals still count at
/// every mark, they just do not stretch the axis.
pub const MAX_AXIS_MONTHS: f64 = 1200.0;

/// Curve points from the survival threshold onwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalCurveView {
    pub points: Vec<SurvivalPoint>,
}

impl SurvivalCurveView {
    /// Builds the curve for `records` as seen with survival threshold `min_months`.
    ///
    /// Marks are the multiples of 12 up to the larger of 120 and the observed
    /// maximum rounded up to a whole year (at most 1200), plus `min_months` itself. Marks
    /// below the threshold are dropped; an empty result becomes `[(0, 0)]`.
    ///
    /// ```
    /// # use oncoreg_analysis::survival_curve::SurvivalCurveView;
    /// # use oncoreg_engine::{CancerType, PatientRecord, Stage, VitalStatus};
    /// let records: Vec<_> = [6.0, 18.0, 30.0, 42.0]
    ///     .into_iter()
    ///     .map(|m| PatientRecord::new("x", CancerType::Liver, Stage::StageII, VitalStatus::Alive, m))
    ///     .collect();
    /// let curve = SurvivalCurveView::compute(&records, 0.0);
    /// assert_eq!(curve.percent_at(0.0), Some(100.0));
    /// assert_eq!(curve.percent_at(12.0), Some(75.0));
    /// assert_eq!(curve.percent_at(48.0), Some(0.0));
    /// ```
    #[must_use]
    pub fn compute(records: &[PatientRecord], min_months: f64) -> Self {
        if records.is_empty() {
            return Self::empty();
        }

        let durations = records
            .iter()
            .map(PatientRecord::survival_months)
            .collect::<Vec<_>>();
        let observed_max = durations.iter().copied().fold(0.0, f64::max);
        let upper = ((observed_max / MARK_STEP_MONTHS).ceil() * MARK_STEP_MONTHS)
            .clamp(MIN_AXIS_MONTHS, MAX_AXIS_MONTHS);

        let mut marks = survival::month_marks(MARK_STEP_MONTHS, upper);
        if !marks.contains(&min_months) {
            marks.push(min_months);
            marks.sort_by(f64::total_cmp);
        }
        marks.retain(|&m| m >= min_months);

        let curve = ThresholdSurvivalCurve::from_durations(&durations, &marks);
        if curve.points.is_empty() {
            return Self::empty();
        }
        Self {
            points: curve.points,
        }
    }

    fn empty() -> Self {
        Self {
            points: vec![SurvivalPoint {
                month: 0.0,
                percent: 0.0,
            }],
        }
    }

    #[must_use]
    pub fn percent_at(&self, month: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.month == month)
            .map(|p| p.percent)
    }
}

/// Share of patients surviving at least one, three and five years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LandmarkRates {
    pub one_year: u32,
    pub three_year: u32,
    pub five_year: u32,
}

impl LandmarkRates {
    /// Rates over `baseline`, which should ignore the status and survival
    /// threshold clauses (see `oncoreg_engine::filter::apply_baseline`).
    #[must_use]
    pub fn compute(baseline: &[PatientRecord]) -> Self {
        let at = |landmark: SurvivalLandmark| {
            let months = landmark.months();
            let survived = baseline
                .iter()
                .filter(|r| r.survival_months() >= months)
                .count();
            rate::rounded_percentage(survived, baseline.len())
        };
        Self {
            one_year: at(SurvivalLandmark::OneYear),
            three_year: at(SurvivalLandmark::ThreeYear),
            five_year: at(SurvivalLandmark::FiveYear),
        }
    }

    #[must_use]
    pub fn get(&self, landmark: SurvivalLandmark) -> u32 {
        match landmark {
            SurvivalLandmark::OneYear => self.one_year,
            SurvivalLandmark::ThreeYear => self.three_year,
            SurvivalLandmark::FiveYear => self.five_year,
        }
    }
}
