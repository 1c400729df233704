//! The loaded registry dataset.

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use crate::{PatientId, PatientRecord};

/// Immutable dataset shared by the filter pipeline and the comparison view.
///
/// Cloning is cheap; a reload replaces the whole store rather than patching it.
/// An empty store is a valid state (for example after a failed load) and every
/// view accepts it.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<[PatientRecord]>,
    index: Arc<HashMap<PatientId, usize>>,
}

impl RecordStore {
    /// Builds a store. When an id occurs more than once the first row wins
    /// for [`RecordStore::get`], but every row is kept.
    #[must_use]
    pub fn new(records: Vec<PatientRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            match index.entry(record.id().clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(i);
                }
                Entry::Occupied(_) => log::warn!("duplicate patient id {}", record.id()),
            }
        }
        Self {
            records: records.into(),
            index: Arc::new(index),
        }
    }

    /// Attaches ages from an id-to-age sidecar; ids absent from the map get no age.
    #[must_use]
    pub fn with_ages(records: Vec<PatientRecord>, ages: &HashMap<PatientId, f64>) -> Self {
        let records = records
            .into_iter()
            .map(|record| {
                let age = ages.get(record.id()).copied();
                record.with_age(age)
            })
            .collect();
        Self::new(records)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &PatientId) -> Option<&PatientRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Number of records that carry an age.
    #[must_use]
    pub fn age_count(&self) -> usize {
        self.records.iter().filter(|r| r.age().is_some()).count()
    }

    /// Whether any record carries an age.
    #[must_use]
    pub fn has_age_data(&self) -> bool {
        self.records.iter().any(|r| r.age().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancerType, Stage, VitalStatus};

    fn record(id: &str, ty: CancerType) -> PatientRecord {
        PatientRecord::new(id, ty, Stage::StageI, VitalStatus::Alive, 10.0)
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::empty();
        assert!(store.is_empty());
        assert!(!store.has_age_data());
    }

    #[test]
    fn test_lookup_by_id() {
        let store = RecordStore::new(vec![record("A", CancerType::Lung), record("B", CancerType::Colon)]);
        let found = store.get(&PatientId::from("B")).unwrap();
        assert_eq!(found.cancer_type(), CancerType::Colon);
        assert!(store.get(&PatientId::from("C")).is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_all_rows() {
        let store = RecordStore::new(vec![record("A", CancerType::Lung), record("A", CancerType::Liver)]);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(&PatientId::from("A")).unwrap().cancer_type(),
            CancerType::Lung
        );
    }

    #[test]
    fn test_ages_from_sidecar() {
        let ages = HashMap::from([(PatientId::from("A"), 44.0), (PatientId::from("Z"), 90.0)]);
        let store = RecordStore::with_ages(
            vec![record("A", CancerType::Lung), record("B", CancerType::Lung)],
            &ages,
        );
        assert_eq!(store.age_count(), 1);
        assert!(store.has_age_data());
        assert_eq!(store.get(&PatientId::from("B")).unwrap().age(), None);
    }
}
