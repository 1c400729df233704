//! Headline figures for the dashboard header.

use oncoreg_engine::{PatientRecord, Stage};
use oncoreg_stats::rate;
use serde::Serialize;

/// Patients per stage, including `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub stage_i: usize,
    pub stage_ii: usize,
    pub stage_iii: usize,
    pub stage_iv: usize,
    pub unknown: usize,
}

impl StageCounts {
    #[must_use]
    pub fn get(&self, stage: Stage) -> usize {
        match stage {
            Stage::StageI => self.stage_i,
            Stage::StageII => self.stage_ii,
            Stage::StageIII => self.stage_iii,
            Stage::StageIV => self.stage_iv,
            Stage::Unknown => self.unknown,
        }
    }

    fn slot(&mut self, stage: Stage) -> &mut usize {
        match stage {
            Stage::StageI => &mut self.stage_i,
            Stage::StageII => &mut self.stage_ii,
            Stage::StageIII => &mut self.stage_iii,
            Stage::StageIV => &mut self.stage_iv,
            Stage::Unknown => &mut self.unknown,
        }
    }
}

/// Survivors of one ranked stage, shown as `survived/total` and a rounded rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageSurvival {
    pub stage: Stage,
    pub survived: usize,
    pub total: usize,
    pub rate: u32,
}

/// The ranked stage with the lowest rounded survival rate below 100.
/// Stage IV at 100 when no stage is below that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriticalStage {
    pub stage: Stage,
    pub rate: u32,
}

impl Default for CriticalStage {
    fn default() -> Self {
        Self {
            stage: Stage::StageIV,
            rate: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub alive: usize,
    pub deceased: usize,
    /// Mean of whole survival months, one decimal.
    pub avg_survival_months: f64,
    /// Alive share in whole percent.
    pub survival_rate: u32,
    pub stage_counts: StageCounts,
    pub stage_survival: [StageSurvival; 4],
    pub critical_stage: CriticalStage,
}

impl Kpis {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let total = records.len();
        let alive = records.iter().filter(|r| r.is_alive()).count();

        let mut stage_counts = StageCounts::default();
        let mut stage_alive = [0; 4];
        for record in records {
            *stage_counts.slot(record.stage()) += 1;
            if let Some(i) = record.stage().ranked_index()
                && record.is_alive()
            {
                stage_alive[i] += 1;
            }
        }

        let stage_survival = Stage::RANKED.map(|stage| {
            let survived = stage.ranked_index().map_or(0, |i| stage_alive[i]);
            let total = stage_counts.get(stage);
            StageSurvival {
                stage,
                survived,
                total,
                rate: rate::rounded_percentage(survived, total),
            }
        });

        let critical_stage = stage_survival
            .iter()
            .filter(|s| s.total > 0 && s.rate < 100)
            .min_by_key(|s| s.rate)
            .map_or_else(CriticalStage::default, |s| CriticalStage {
                stage: s.stage,
                rate: s.rate,
            });

        Self {
            total,
            alive,
            deceased: total - alive,
            avg_survival_months: rate::round_to(
                rate::mean_or_zero(records.iter().map(PatientRecord::whole_months)),
                1,
            ),
            survival_rate: rate::rounded_percentage(alive, total),
            stage_counts,
            stage_survival,
            critical_stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::{CancerType, VitalStatus};

    use super::*;

    fn record(stage: Stage, status: VitalStatus, months: f64) -> PatientRecord {
        PatientRecord::new("x", CancerType::Colon, stage, status, months)
    }

    #[test]
    fn test_empty_subset() {
        let kpis = Kpis::compute(&[]);
        assert_eq!(kpis.total, 0);
        assert_eq!(kpis.avg_survival_months, 0.0);
        assert_eq!(kpis.survival_rate, 0);
        assert_eq!(kpis.critical_stage, CriticalStage::default());
        assert!(kpis.stage_survival.iter().all(|s| s.rate == 0));
    }

    #[test]
    fn test_headline_counts() {
        let records = [
            record(Stage::StageI, VitalStatus::Alive, 10.0),
            record(Stage::StageI, VitalStatus::Deceased, 15.0),
            record(Stage::StageIII, VitalStatus::Alive, 20.0),
            record(Stage::Unknown, VitalStatus::Deceased, 7.0),
        ];
        let kpis = Kpis::compute(&records);
        assert_eq!(kpis.total, 4);
        assert_eq!(kpis.alive, 2);
        assert_eq!(kpis.deceased, 2);
        assert_eq!(kpis.avg_survival_months, 13.0);
        assert_eq!(kpis.survival_rate, 50);
        assert_eq!(kpis.stage_counts.get(Stage::Unknown), 1);
        assert_eq!(kpis.stage_counts.get(Stage::StageII), 0);
    }

    #[test]
    fn test_stage_survival_and_critical_stage() {
        let records = [
            record(Stage::StageII, VitalStatus::Alive, 10.0),
            record(Stage::StageII, VitalStatus::Alive, 10.0),
            record(Stage::StageII, VitalStatus::Deceased, 10.0),
            record(Stage::StageIV, VitalStatus::Alive, 10.0),
            record(Stage::StageIV, VitalStatus::Deceased, 10.0),
            record(Stage::StageIV, VitalStatus::Deceased, 10.0),
        ];
        let kpis = Kpis::compute(&records);
        let stage_ii = kpis.stage_survival[1];
        assert_eq!((stage_ii.survived, stage_ii.total, stage_ii.rate), (2, 3, 67));
        assert_eq!(kpis.stage_survival[0].total, 0);
        assert_eq!(
            kpis.critical_stage,
            CriticalStage {
                stage: Stage::StageIV,
                rate: 33
            }
        );
    }

    #[test]
    fn test_critical_stage_all_surviving_stays_stage_iv() {
        let records = [
            record(Stage::StageI, VitalStatus::Alive, 1.0),
            record(Stage::StageII, VitalStatus::Alive, 1.0),
            record(Stage::StageIII, VitalStatus::Alive, 1.0),
        ];
        let kpis = Kpis::compute(&records);
        assert_eq!(kpis.critical_stage, CriticalStage::default());
        assert_eq!(kpis.critical_stage.stage, Stage::StageIV);
        assert_eq!(kpis.critical_stage.rate, 100);
    }

    #[test]
    fn test_average_counts_whole_months() {
        let records = [
            record(Stage::StageI, VitalStatus::Alive, 10.9),
            record(Stage::StageII, VitalStatus::Alive, 11.8),
        ];
        assert_eq!(Kpis::compute(&records).avg_survival_months, 10.5);
    }

    #[test]
    fn test_critical_stage_tie_prefers_earliest() {
        let records = [
            record(Stage::StageI, VitalStatus::Deceased, 1.0),
            record(Stage::StageIII, VitalStatus::Deceased, 1.0),
        ];
        let kpis = Kpis::compute(&records);
        assert_eq!(kpis.critical_stage.stage, Stage::StageI);
        assert_eq!(kpis.critical_stage.rate, 0);
    }
}
