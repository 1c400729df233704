use crate::{PatientRecord, filter::FilterState};

/// Returns the records that pass every clause of `state`, in dataset order.
#[must_use]
pub fn apply(all: &[PatientRecord], state: &FilterState) -> Vec<PatientRecord> {
    all.iter().filter(|r| matches(r, state)).cloned().collect()
}

/// Like [`apply`] but only evaluates the cancer-type, lung-subtype and stage
/// clauses. Status and the survival threshold are ignored.
///
/// Landmark rates are read from this baseline so that they do not collapse
/// when the threshold itself is set to a landmark.
#[must_use]
pub fn apply_baseline(all: &[PatientRecord], state: &FilterState) -> Vec<PatientRecord> {
    all.iter()
        .filter(|r| matches_baseline(r, state))
        .cloned()
        .collect()
}

/// Whether `record` passes every clause.
#[must_use]
pub fn matches(record: &PatientRecord, state: &FilterState) -> bool {
    matches_baseline(record, state)
        && state.status().admits(record.status())
        && record.survival_months() >= state.survival_months_min()
}

fn matches_baseline(record: &PatientRecord, state: &FilterState) -> bool {
    matches_cancer_type(record, state)
        && matches_lung_subtype(record, state)
        && state.selected_stages().contains(&record.stage())
}

fn matches_cancer_type(record: &PatientRecord, state: &FilterState) -> bool {
    let selected = state.selected_cancer_types();
    selected.is_empty() || selected.contains(&record.cancer_type())
}

fn matches_lung_subtype(record: &PatientRecord, state: &FilterState) -> bool {
    if !state.is_lung_only() {
        return true;
    }
    match state.lung_subtype().subtype() {
        None => true,
        Some(subtype) => record.lung_subtype() == Some(subtype),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancerType, LungSubtypeFilter, Stage, StatusFilter, VitalStatus};

    fn dataset() -> Vec<PatientRecord> {
        vec![
            PatientRecord::new("1", CancerType::Lung, Stage::StageI, VitalStatus::Alive, 30.0)
                .with_lung_subtype(Some("Adenocarcinoma")),
            PatientRecord::new("2", CancerType::Lung, Stage::StageIV, VitalStatus::Deceased, 8.0)
                .with_lung_subtype(Some("Squamous")),
            PatientRecord::new("3", CancerType::Breast, Stage::StageII, VitalStatus::Alive, 62.0),
            PatientRecord::new("4", CancerType::Colon, Stage::Unknown, VitalStatus::Deceased, 14.0),
            PatientRecord::new("5", CancerType::Liver, Stage::StageIII, VitalStatus::Alive, 0.0),
            PatientRecord::new("6", CancerType::Ovarian, Stage::StageI, VitalStatus::Deceased, 50.0),
        ]
    }

    fn ids(records: &[PatientRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id().as_str()).collect()
    }

    fn assert_clauses_hold(record: &PatientRecord, state: &FilterState) {
        let types = state.selected_cancer_types();
        assert!(types.is_empty() || types.contains(&record.cancer_type()));
        if state.is_lung_only()
            && let Some(subtype) = state.lung_subtype().subtype()
        {
            assert_eq!(record.lung_subtype(), Some(subtype));
        }
        assert!(state.status().admits(record.status()));
        assert!(record.survival_months() >= state.survival_months_min());
        assert!(state.selected_stages().contains(&record.stage()));
    }

    fn sample_states() -> Vec<FilterState> {
        let mut states = vec![FilterState::default()];

        let mut s = FilterState::default();
        s.select_cancer_type(Some(CancerType::Lung));
        s.set_lung_subtype(LungSubtypeFilter::Subtype("Squamous".into()));
        states.push(s);

        let mut s = FilterState::default();
        s.set_status(StatusFilter::Alive);
        s.set_survival_months_min(20.0);
        states.push(s);

        let mut s = FilterState::default();
        s.toggle_cancer_type(CancerType::Colon);
        s.toggle_cancer_type(CancerType::Ovarian);
        s.set_stage_included(Stage::Unknown, false);
        states.push(s);

        let mut s = FilterState::default();
        s.set_stages([]);
        states.push(s);

        states
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let all = dataset();
        assert_eq!(apply(&all, &FilterState::default()), all);
    }

    #[test]
    fn test_filtered_is_subset_satisfying_all_clauses() {
        let all = dataset();
        for state in sample_states() {
            let filtered = apply(&all, &state);
            assert!(filtered.len() <= all.len());
            for record in &filtered {
                assert_clauses_hold(record, &state);
            }
        }
    }

    #[test]
    fn test_empty_selection_equals_full_selection() {
        let all = dataset();
        let mut full = FilterState::default();
        full.set_cancer_types(CancerType::ALL);
        full.set_survival_months_min(10.0);
        let mut empty = FilterState::default();
        empty.set_survival_months_min(10.0);
        assert_eq!(apply(&all, &full), apply(&all, &empty));
    }

    #[test]
    fn test_idempotent_and_non_mutating() {
        let all = dataset();
        let before = all.clone();
        for state in sample_states() {
            let once = apply(&all, &state);
            let twice = apply(&once, &state);
            assert_eq!(once, twice);
        }
        assert_eq!(all, before);
    }

    #[test]
    fn test_order_is_preserved() {
        let all = dataset();
        let mut state = FilterState::default();
        state.set_status(StatusFilter::Deceased);
        assert_eq!(ids(&apply(&all, &state)), ["2", "4", "6"]);
    }

    #[test]
    fn test_lung_subtype_clause() {
        let all = dataset();
        let mut state = FilterState::default();
        state.select_cancer_type(Some(CancerType::Lung));
        state.set_lung_subtype(LungSubtypeFilter::Subtype("Adenocarcinoma".into()));
        assert_eq!(ids(&apply(&all, &state)), ["1"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let all = dataset();
        let mut state = FilterState::default();
        state.set_survival_months_min(30.0);
        assert_eq!(ids(&apply(&all, &state)), ["1", "3", "6"]);
    }

    #[test]
    fn test_baseline_ignores_status_and_threshold() {
        let all = dataset();
        let mut state = FilterState::default();
        state.toggle_cancer_type(CancerType::Lung);
        state.set_status(StatusFilter::Alive);
        state.set_survival_months_min(60.0);
        assert!(apply(&all, &state).is_empty());
        assert_eq!(ids(&apply_baseline(&all, &state)), ["1", "2"]);
    }
}
