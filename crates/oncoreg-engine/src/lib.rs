//! Patient registry data model and filter engine.
//!
//! - [`core`] - Closed domain enums ([`CancerType`], [`Stage`], [`VitalStatus`],
//!   [`AgeGroup`]) and the immutable [`PatientRecord`]
//! - [`store`] - [`RecordStore`], the loaded dataset
//! - [`filter`] - [`FilterState`] and the pure filter function
//! - [`pagination`] - Page slicing with clamped page numbers
//! - [`spotlight`] - Cursor arithmetic for the single-patient spotlight
//!
//! # Example
//!
//! ```
//! use oncoreg_engine::{
//!     CancerType, FilterState, PatientRecord, RecordStore, Stage, VitalStatus, filter,
//! };
//!
//! let store = RecordStore::new(vec![
//!     PatientRecord::new("P1", CancerType::Lung, Stage::StageII, VitalStatus::Alive, 14.0),
//!     PatientRecord::new("P2", CancerType::Breast, Stage::StageI, VitalStatus::Deceased, 40.0),
//! ]);
//!
//! let mut state = FilterState::default();
//! state.toggle_cancer_type(CancerType::Lung);
//!
//! let filtered = filter::apply(store.records(), &state);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].id().as_str(), "P1");
//! ```

pub use self::{
    core::*,
    filter::{FilterState, LungSubtypeFilter, StatusFilter, SurvivalLandmark},
    pagination::Page,
    store::RecordStore,
};

pub mod core;
pub mod filter;
pub mod pagination;
pub mod spotlight;
pub mod store;

/// A label that does not name a member of one of the closed domain sets.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind}: {label:?}")]
pub struct ParseLabelError {
    kind: &'static str,
    label: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_owned(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}
