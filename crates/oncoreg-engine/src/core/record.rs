use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct as _};

use super::{AgeGroup, CancerType, Stage, VitalStatus};

/// Opaque registry identifier of a patient.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PatientId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One registry row.
///
/// Records are immutable once built. The constructors enforce the row
/// invariants:
///
/// - `survival_months` is finite and non-negative (anything else becomes `0`)
/// - `lung_subtype` is only kept for [`CancerType::Lung`]
/// - `age` is finite and non-negative, otherwise absent
///
/// The age group is derived from `age` on demand and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    id: PatientId,
    cancer_type: CancerType,
    lung_subtype: Option<String>,
    stage: Stage,
    status: VitalStatus,
    survival_months: f64,
    age: Option<f64>,
}

/// Clamps a survival duration to a finite, non-negative value.
///
/// ```
/// # use oncoreg_engine::sanitize_survival_months;
/// assert_eq!(sanitize_survival_months(14.5), 14.5);
/// assert_eq!(sanitize_survival_months(f64::NAN), 0.0);
/// assert_eq!(sanitize_survival_months(-3.0), 0.0);
/// ```
#[must_use]
pub fn sanitize_survival_months(months: f64) -> f64 {
    if months.is_finite() && months > 0.0 {
        months
    } else {
        0.0
    }
}

impl PatientRecord {
    #[must_use]
    pub fn new(
        id: impl Into<PatientId>,
        cancer_type: CancerType,
        stage: Stage,
        status: VitalStatus,
        survival_months: f64,
    ) -> Self {
        Self {
            id: id.into(),
            cancer_type,
            lung_subtype: None,
            stage,
            status,
            survival_months: sanitize_survival_months(survival_months),
            age: None,
        }
    }

    /// Sets the lung subtype. Blank subtypes and subtypes on non-lung records are dropped.
    #[must_use]
    pub fn with_lung_subtype(mut self, subtype: Option<impl Into<String>>) -> Self {
        let keep = self.cancer_type.has_subtypes();
        self.lung_subtype = subtype
            .map(Into::into)
            .map(|s: String| s.trim().to_owned())
            .filter(|s| keep && !s.is_empty());
        self
    }

    /// Sets the age in years. Non-finite or negative ages are treated as unknown.
    #[must_use]
    pub fn with_age(mut self, age: Option<f64>) -> Self {
        self.age = age.filter(|a| a.is_finite() && *a >= 0.0);
        self
    }

    #[must_use]
    pub fn id(&self) -> &PatientId {
        &self.id
    }

    #[must_use]
    pub fn cancer_type(&self) -> CancerType {
        self.cancer_type
    }

    #[must_use]
    pub fn lung_subtype(&self) -> Option<&str> {
        self.lung_subtype.as_deref()
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn status(&self) -> VitalStatus {
        self.status
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    #[must_use]
    pub fn survival_months(&self) -> f64 {
        self.survival_months
    }

    /// Survival truncated to whole months.
    ///
    /// The headline average, the comparison view and the spotlight count
    /// whole months; curves, landmarks and per-type breakdowns use the exact
    /// value.
    #[must_use]
    pub fn whole_months(&self) -> f64 {
        self.survival_months.trunc()
    }

    #[must_use]
    pub fn age(&self) -> Option<f64> {
        self.age
    }

    #[must_use]
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.and_then(AgeGroup::from_age)
    }
}

impl Serialize for PatientRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PatientRecord", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("cancer_type", &self.cancer_type)?;
        state.serialize_field("lung_subtype", &self.lung_subtype)?;
        state.serialize_field("stage", &self.stage)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("survival_months", &self.survival_months)?;
        state.serialize_field("age", &self.age)?;
        state.serialize_field("age_group", &self.age_group())?;
        state.end()
    }
}
