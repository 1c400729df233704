//! Single-patient spotlight.

use std::fmt::Write as _;

use oncoreg_engine::{CancerType, PatientRecord, Stage, spotlight};
use oncoreg_stats::rate;
use serde::Serialize;

/// Human-readable description of one record from the filtered subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientProfile {
    pub record: PatientRecord,
    /// 1-based position in the filtered subset.
    pub position: usize,
    pub total: usize,
    /// Cancer type, with the subtype for lung records that have one.
    pub cancer_label: String,
    pub duration_text: String,
    /// Mean survival of the record's cancer type over the full dataset.
    pub type_average_months: f64,
    pub prognosis_delta_months: f64,
    pub prognosis_text: String,
    pub narrative: String,
}

/// Whole months of a survival duration, as shown in the spotlight.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_months(months: f64) -> u32 {
    months.floor() as u32
}

/// Formats a duration as `2y 3m`, `2 years` or `9 months`.
///
/// ```
/// # use oncoreg_analysis::profile::duration_text;
/// assert_eq!(duration_text(27.0), "2y 3m");
/// assert_eq!(duration_text(24.0), "2 years");
/// assert_eq!(duration_text(9.6), "9 months");
/// ```
#[must_use]
pub fn duration_text(months: f64) -> String {
    let months = whole_months(months);
    let (years, rest) = (months / 12, months % 12);
    match (years, rest) {
        (0, _) => format!("{months} months"),
        (_, 0) => format!("{years} years"),
        _ => format!("{years}y {rest}m"),
    }
}

fn type_average(all: &[PatientRecord], cancer_type: CancerType) -> f64 {
    rate::mean_or_zero(
        all.iter()
            .filter(|r| r.cancer_type() == cancer_type)
            .map(PatientRecord::whole_months),
    )
}

fn narrative(record: &PatientRecord, months: f64, average: f64) -> String {
    let mut text = match (record.cancer_type(), record.lung_subtype()) {
        (CancerType::Lung, Some(subtype)) => {
            format!("This patient was diagnosed with {subtype} lung cancer at {}. ", record.stage())
        }
        (cancer_type, _) => format!(
            "This patient was diagnosed with {} cancer at {}. ",
            cancer_type.to_str().to_lowercase(),
            record.stage()
        ),
    };

    let comparison = if months > average {
        "above"
    } else if months < average {
        "below"
    } else {
        "at"
    };
    let years = months / 12.0;
    let average_years = average / 12.0;
    if record.is_alive() {
        let _ = write!(
            text,
            "Currently surviving at {years:.1} years, which is {comparison} the average of \
             {average_years:.1} years for this cancer type."
        );
    } else {
        let _ = write!(
            text,
            "Survived for {years:.1} years before passing, which was {comparison} the average of \
             {average_years:.1} years."
        );
    }

    if record.stage() == Stage::StageIV && months > 24.0 {
        text.push_str(" Notably exceeded typical Stage IV expectations.");
    } else if record.stage() == Stage::StageI && !record.is_alive() {
        text.push_str(" An unfortunate outcome despite early detection.");
    }
    text
}

impl PatientProfile {
    /// Profile of the record at `index` in `filtered` (clamped into range),
    /// with type averages taken from `all`. `None` for an empty subset.
    #[must_use]
    pub fn build(filtered: &[PatientRecord], index: usize, all: &[PatientRecord]) -> Option<Self> {
        if filtered.is_empty() {
            return None;
        }
        let index = spotlight::clamp_index(index, filtered.len());
        let record = &filtered[index];

        let months = record.whole_months();
        let average = type_average(all, record.cancer_type());
        let delta = months - average;
        let prognosis_text = if delta >= 0.0 {
            format!("+{delta:.0}m")
        } else {
            format!("{delta:.0}m")
        };
        let cancer_label = match record.lung_subtype() {
            Some(subtype) => format!("{} ({subtype})", record.cancer_type()),
            None => record.cancer_type().to_string(),
        };

        Some(Self {
            record: record.clone(),
            position: index + 1,
            total: filtered.len(),
            cancer_label,
            duration_text: duration_text(months),
            type_average_months: average,
            prognosis_delta_months: delta,
            prognosis_text,
            narrative: narrative(record, months, average),
        })
    }
}

#[cfg(test)]
mod tests {
    use oncoreg_engine::VitalStatus;

    use super::*;

    fn record(
        id: &str,
        cancer_type: CancerType,
        stage: Stage,
        status: VitalStatus,
        months: f64,
    ) -> PatientRecord {
        PatientRecord::new(id, cancer_type, stage, status, months)
    }

    #[test]
    fn test_empty_subset() {
        assert!(PatientProfile::build(&[], 0, &[]).is_none());
    }

    #[test]
    fn test_alive_lung_with_subtype() {
        let patient = record("L1", CancerType::Lung, Stage::StageII, VitalStatus::Alive, 30.0)
            .with_lung_subtype(Some("Adenocarcinoma"));
        let all = vec![
            patient.clone(),
            record("L2", CancerType::Lung, Stage::StageIII, VitalStatus::Deceased, 18.0),
        ];
        let profile = PatientProfile::build(std::slice::from_ref(&patient), 0, &all).unwrap();
        assert_eq!(profile.position, 1);
        assert_eq!(profile.cancer_label, "Lung (Adenocarcinoma)");
        assert_eq!(profile.duration_text, "2y 6m");
        assert_eq!(profile.type_average_months, 24.0);
        assert_eq!(profile.prognosis_text, "+6m");
        assert_eq!(
            profile.narrative,
            "This patient was diagnosed with Adenocarcinoma lung cancer at Stage II. \
             Currently surviving at 2.5 years, which is above the average of 2.0 years for this cancer type."
        );
    }

    #[test]
    fn test_deceased_stage_i() {
        let patient = record("C1", CancerType::Colon, Stage::StageI, VitalStatus::Deceased, 6.0);
        let all = vec![
            patient.clone(),
            record("C2", CancerType::Colon, Stage::StageII, VitalStatus::Alive, 30.0),
        ];
        let profile = PatientProfile::build(&all, 0, &all).unwrap();
        assert_eq!(profile.prognosis_text, "-12m");
        assert_eq!(profile.duration_text, "6 months");
        assert_eq!(
            profile.narrative,
            "This patient was diagnosed with colon cancer at Stage I. \
             Survived for 0.5 years before passing, which was below the average of 1.5 years. \
             An unfortunate outcome despite early detection."
        );
    }

    #[test]
    fn test_stage_iv_long_survivor_note() {
        let patient = record("P1", CancerType::Pancreas, Stage::StageIV, VitalStatus::Alive, 36.0);
        let profile = PatientProfile::build(std::slice::from_ref(&patient), 0, std::slice::from_ref(&patient)).unwrap();
        assert!(profile.narrative.contains("which is at the average"));
        assert!(profile.narrative.ends_with(" Notably exceeded typical Stage IV expectations."));
        assert_eq!(profile.prognosis_text, "+0m");
    }

    #[test]
    fn test_index_is_clamped() {
        let all = vec![
            record("A", CancerType::Breast, Stage::StageI, VitalStatus::Alive, 1.0),
            record("B", CancerType::Breast, Stage::StageI, VitalStatus::Alive, 2.0),
        ];
        let profile = PatientProfile::build(&all, 10, &all).unwrap();
        assert_eq!(profile.record.id().as_str(), "B");
        assert_eq!(profile.position, 2);
        assert_eq!(profile.total, 2);
    }
}
