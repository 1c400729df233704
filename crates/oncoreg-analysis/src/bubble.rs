//! Average survival per cancer type and ranked stage, for the bubble plot.

use std::collections::BTreeSet;

use oncoreg_engine::{CancerType, PatientRecord, Stage};
use oncoreg_stats::rate;
use serde::{Deserialize, Serialize};

/// Cancer types visible in the bubble view.
///
/// Independent of the filter's cancer-type selection; defaults to all eight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BubbleSelection(BTreeSet<CancerType>);

impl Default for BubbleSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl BubbleSelection {
    #[must_use]
    pub fn all() -> Self {
        Self(CancerType::ALL.into_iter().collect())
    }

    #[must_use]
    pub fn only(cancer_type: CancerType) -> Self {
        Self(BTreeSet::from([cancer_type]))
    }

    #[must_use]
    pub fn contains(&self, cancer_type: CancerType) -> bool {
        self.0.contains(&cancer_type)
    }

    pub fn toggle(&mut self, cancer_type: CancerType) {
        if !self.0.remove(&cancer_type) {
            self.0.insert(cancer_type);
        }
    }

    pub fn select_all(&mut self) {
        *self = Self::all();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BubblePoint {
    /// Average survival in months.
    pub x: f64,
    /// Stage rank, 1 to 4.
    pub y: u8,
    /// Patients behind the point.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleSeries {
    pub cancer_type: CancerType,
    pub hidden: bool,
    pub points: Vec<BubblePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// One series per cancer type, always all eight in [`CancerType::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleView {
    pub series: Vec<BubbleSeries>,
    pub x_axis: AxisRange,
}

impl BubbleView {
    pub const DEFAULT_AXIS_MAX: f64 = 120.0;
    const AXIS_STEP: f64 = 6.0;

    #[must_use]
    pub fn compute(records: &[PatientRecord], selection: &BubbleSelection, min_months: f64) -> Self {
        let series = CancerType::ALL
            .into_iter()
            .map(|cancer_type| {
                let hidden = !selection.contains(cancer_type);
                let points = if hidden {
                    vec![]
                } else {
                    stage_points(records, cancer_type)
                };
                BubbleSeries {
                    cancer_type,
                    hidden,
                    points,
                }
            })
            .collect::<Vec<_>>();

        let max_avg = series
            .iter()
            .flat_map(|s| &s.points)
            .map(|p| p.x)
            .reduce(f64::max);
        let padded = max_avg.map_or(Self::DEFAULT_AXIS_MAX, |max| {
            Self::DEFAULT_AXIS_MAX.max(((max + Self::AXIS_STEP) / Self::AXIS_STEP).ceil() * Self::AXIS_STEP)
        });
        let min = min_months.max(0.0);
        let x_axis = AxisRange {
            min,
            max: padded.max(min + Self::AXIS_STEP),
        };

        Self { series, x_axis }
    }

    #[must_use]
    pub fn series(&self, cancer_type: CancerType) -> Option<&BubbleSeries> {
        self.series.iter().find(|s| s.cancer_type == cancer_type)
    }

    #[must_use]
    pub fn has_points(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
    }
}

fn stage_points(records: &[PatientRecord], cancer_type: CancerType) -> Vec<BubblePoint> {
    Stage::RANKED
        .into_iter()
        .filter_map(|stage| {
            let months = records
                .iter()
                .filter(|r| r.cancer_type() == cancer_type && r.stage() == stage)
                .map(PatientRecord::survival_months)
                .collect::<Vec<_>>();
            let rank = stage.rank()?;
            (!months.is_empty()).then(|| BubblePoint {
                x: rate::mean_or_zero(months.iter().copied()),
                y: rank,
                count: months.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::VitalStatus;

    use super::*;

    fn record(cancer_type: CancerType, stage: Stage, months: f64) -> PatientRecord {
        PatientRecord::new("x", cancer_type, stage, VitalStatus::Alive, months)
    }

    #[test]
    fn test_points_per_stage() {
        let records = [
            record(CancerType::Colon, Stage::StageI, 10.0),
            record(CancerType::Colon, Stage::StageI, 30.0),
            record(CancerType::Colon, Stage::StageIII, 8.0),
            record(CancerType::Colon, Stage::Unknown, 90.0),
        ];
        let view = BubbleView::compute(&records, &BubbleSelection::all(), 0.0);
        assert_eq!(view.series.len(), 8);
        let colon = view.series(CancerType::Colon).unwrap();
        assert_eq!(
            colon.points,
            [
                BubblePoint { x: 20.0, y: 1, count: 2 },
                BubblePoint { x: 8.0, y: 3, count: 1 },
            ]
        );
        assert!(view.series(CancerType::Lung).unwrap().points.is_empty());
        assert_eq!(view.x_axis, AxisRange { min: 0.0, max: 120.0 });
    }

    #[test]
    fn test_deselected_types_are_hidden() {
        let records = [record(CancerType::Colon, Stage::StageI, 10.0)];
        let mut selection = BubbleSelection::all();
        selection.toggle(CancerType::Colon);
        let view = BubbleView::compute(&records, &selection, 0.0);
        let colon = view.series(CancerType::Colon).unwrap();
        assert!(colon.hidden);
        assert!(colon.points.is_empty());
        assert!(!view.has_points());
        assert_eq!(view.x_axis.max, BubbleView::DEFAULT_AXIS_MAX);
    }

    #[test]
    fn test_axis_padding() {
        let records = [record(CancerType::Liver, Stage::StageII, 125.0)];
        let view = BubbleView::compute(&records, &BubbleSelection::all(), 0.0);
        // ceil((125 + 6) / 6) * 6 = 132
        assert_eq!(view.x_axis.max, 132.0);

        let view = BubbleView::compute(&records, &BubbleSelection::all(), 130.0);
        assert_eq!(view.x_axis, AxisRange { min: 130.0, max: 136.0 });
    }

    #[test]
    fn test_selection_ops() {
        let mut selection = BubbleSelection::default();
        assert_eq!(selection.len(), 8);
        selection.clear();
        assert!(selection.is_empty());
        selection.toggle(CancerType::Prostate);
        assert_eq!(selection, BubbleSelection::only(CancerType::Prostate));
        selection.select_all();
        assert_eq!(selection, BubbleSelection::all());
    }
}
