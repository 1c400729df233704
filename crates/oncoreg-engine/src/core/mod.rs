//! Closed domain sets and the patient record.
//!
//! Every categorical column of the registry is an enum so that a misspelled
//! label cannot silently produce an empty bucket:
//!
//! - [`CancerType`] - The eight registry cancer types
//! - [`Stage`] - Stage I-IV plus `Unknown`; only the first four are ranked
//! - [`VitalStatus`] - Alive or Deceased
//! - [`AgeGroup`] - Fixed age bands derived from an optional age
//! - [`PatientRecord`] - One immutable registry row

pub use self::{age::*, cancer_type::*, record::*, stage::*, status::*};

mod age;
mod cancer_type;
mod record;
mod stage;
mod status;
