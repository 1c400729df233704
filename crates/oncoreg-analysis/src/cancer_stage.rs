//! Survival-rate matrix of cancer type by ranked stage.

use oncoreg_engine::{CancerType, PatientRecord, Stage};
use oncoreg_stats::rate;
use serde::Serialize;

/// Bar height substituted for an exact 0% rate so the bar stays visible.
pub const ZERO_RATE_DISPLAY: f64 = 2.0;

/// One (cancer type, stage) cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageCell {
    NoData,
    Data { alive: usize, total: usize, rate: f64 },
}

impl StageCell {
    fn from_counts(alive: usize, total: usize) -> Self {
        if total == 0 {
            StageCell::NoData
        } else {
            StageCell::Data {
                alive,
                total,
                rate: rate::percentage(alive, total),
            }
        }
    }

    /// True survival rate, or `None` without data.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        match self {
            StageCell::NoData => None,
            StageCell::Data { rate, .. } => Some(*rate),
        }
    }

    /// Rate for charting: like [`StageCell::rate`] but an exact 0 becomes
    /// [`ZERO_RATE_DISPLAY`].
    #[must_use]
    pub fn display_value(&self) -> Option<f64> {
        self.rate()
            .map(|r| if r == 0.0 { ZERO_RATE_DISPLAY } else { r })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancerStageRow {
    pub cancer_type: CancerType,
    /// Cells in [`Stage::RANKED`] order.
    pub cells: [StageCell; 4],
}

impl CancerStageRow {
    #[must_use]
    pub fn cell(&self, stage: Stage) -> StageCell {
        stage
            .ranked_index()
            .map_or(StageCell::NoData, |i| self.cells[i])
    }

    #[must_use]
    pub fn display_values(&self) -> [Option<f64>; 4] {
        self.cells.map(|c| c.display_value())
    }
}

/// One row per cancer type present in the subset, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancerStageMatrix {
    pub rows: Vec<CancerStageRow>,
}

impl CancerStageMatrix {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let types = CancerType::sorted_by_label(records.iter().map(PatientRecord::cancer_type));

        let rows = types
            .into_iter()
            .map(|cancer_type| {
                let mut alive = [0; 4];
                let mut total = [0; 4];
                for record in records.iter().filter(|r| r.cancer_type() == cancer_type) {
                    if let Some(i) = record.stage().ranked_index() {
                        total[i] += 1;
                        if record.is_alive() {
                            alive[i] += 1;
                        }
                    }
                }
                CancerStageRow {
                    cancer_type,
                    cells: std::array::from_fn(|i| StageCell::from_counts(alive[i], total[i])),
                }
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn row(&self, cancer_type: CancerType) -> Option<&CancerStageRow> {
        self.rows.iter().find(|r| r.cancer_type == cancer_type)
    }

    /// Cell for a pair; `NoData` when the type is absent from the subset.
    #[must_use]
    pub fn cell(&self, cancer_type: CancerType, stage: Stage) -> StageCell {
        self.row(cancer_type)
            .map_or(StageCell::NoData, |row| row.cell(stage))
    }
}
