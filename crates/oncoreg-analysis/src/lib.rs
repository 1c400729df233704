//! Aggregate views over a filtered patient subset.
//!
//! Every view is a pure function of the filtered subset (and, for baselines,
//! the full dataset). [`dashboard::DashboardSession`] owns the only mutable
//! state and recomputes the views wholesale whenever the filter changes.
//!
//! # Views
//!
//! - [`kpi`]: Headline counts, rates and the critical stage
//! - [`distribution`]: Patients per cancer type
//! - [`survival_curve`]: Threshold survival curve and 1/3/5-year landmark rates
//! - [`stage_status`]: Alive and deceased counts per ranked stage
//! - [`cancer_stage`]: Survival-rate matrix of cancer type by stage
//! - [`age_band`]: Age-at-diagnosis distribution
//! - [`bubble`]: Average survival per cancer type and stage
//! - [`breakdown`]: Per-type rates and averages, and the critical watch list
//! - [`profile`]: Single-patient spotlight
//! - [`comparison`]: Two cancer types side by side over the whole dataset
//!
//! # Example
//!
//! ```
//! use oncoreg_analysis::dashboard::DashboardSession;
//! use oncoreg_engine::{CancerType, PatientRecord, RecordStore, Stage, VitalStatus};
//!
//! let store = RecordStore::new(vec![
//!     PatientRecord::new("P1", CancerType::Lung, Stage::StageII, VitalStatus::Alive, 14.0),
//!     PatientRecord::new("P2", CancerType::Lung, Stage::StageIV, VitalStatus::Deceased, 6.0),
//!     PatientRecord::new("P3", CancerType::Breast, Stage::StageI, VitalStatus::Alive, 40.0),
//! ]);
//!
//! let mut session = DashboardSession::new(store);
//! session.select_cancer_type(Some(CancerType::Lung));
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.kpis.total, 2);
//! assert_eq!(snapshot.kpis.survival_rate, 50);
//! ```

pub mod age_band;
pub mod breakdown;
pub mod bubble;
pub mod cancer_stage;
pub mod comparison;
pub mod dashboard;
pub mod distribution;
pub mod kpi;
pub mod profile;
pub mod stage_status;
pub mod survival_curve;
