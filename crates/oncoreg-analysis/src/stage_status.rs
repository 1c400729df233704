//! Alive and deceased counts per ranked stage.

use oncoreg_engine::{PatientRecord, Stage};
use serde::Serialize;

/// Two parallel series over [`Stage::RANKED`]. Records with an `Unknown`
/// stage are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStatusMatrix {
    pub alive: [usize; 4],
    pub deceased: [usize; 4],
}

impl StageStatusMatrix {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let mut matrix = Self::default();
        for record in records {
            let Some(i) = record.stage().ranked_index() else {
                continue;
            };
            if record.is_alive() {
                matrix.alive[i] += 1;
            } else {
                matrix.deceased[i] += 1;
            }
        }
        matrix
    }

    pub const STAGES: [Stage; 4] = Stage::RANKED;

    #[must_use]
    pub fn total(&self) -> usize {
        self.alive.iter().chain(&self.deceased).sum()
    }
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::{CancerType, VitalStatus};

    use super::*;

    #[test]
    fn test_unknown_stage_dropped() {
        let records = [
            PatientRecord::new("1", CancerType::Breast, Stage::StageI, VitalStatus::Alive, 1.0),
            PatientRecord::new("2", CancerType::Breast, Stage::StageIV, VitalStatus::Deceased, 1.0),
            PatientRecord::new("3", CancerType::Breast, Stage::StageIV, VitalStatus::Deceased, 1.0),
            PatientRecord::new("4", CancerType::Breast, Stage::Unknown, VitalStatus::Alive, 1.0),
        ];
        let matrix = StageStatusMatrix::compute(&records);
        assert_eq!(matrix.alive, [1, 0, 0, 0]);
        assert_eq!(matrix.deceased, [0, 0, 0, 2]);

        let ranked = records.iter().filter(|r| r.stage().rank().is_some()).count();
        assert_eq!(matrix.total(), ranked);
    }
}
