use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CancerType, ParseLabelError, Stage, VitalStatus, sanitize_survival_months};

/// Status dimension of the filter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum StatusFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    Alive,
    Deceased,
}

impl StatusFilter {
    #[must_use]
    pub fn admits(self, status: VitalStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Alive => status == VitalStatus::Alive,
            StatusFilter::Deceased => status == VitalStatus::Deceased,
        }
    }

    #[must_use]
    pub fn status(self) -> Option<VitalStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Alive => Some(VitalStatus::Alive),
            StatusFilter::Deceased => Some(VitalStatus::Deceased),
        }
    }
}

impl From<VitalStatus> for StatusFilter {
    fn from(status: VitalStatus) -> Self {
        match status {
            VitalStatus::Alive => StatusFilter::Alive,
            VitalStatus::Deceased => StatusFilter::Deceased,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            Some(status) => fmt::Display::fmt(&status, f),
            None => f.write_str("all"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<VitalStatus>()
            .map(StatusFilter::from)
            .map_err(|_| ParseLabelError::new("status filter", s))
    }
}

/// Lung subtype dimension of the filter.
///
/// Serialized as the subtype name, or `"all"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LungSubtypeFilter {
    #[default]
    All,
    Subtype(String),
}

impl LungSubtypeFilter {
    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        match self {
            LungSubtypeFilter::All => None,
            LungSubtypeFilter::Subtype(s) => Some(s),
        }
    }
}

impl From<String> for LungSubtypeFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            LungSubtypeFilter::All
        } else {
            LungSubtypeFilter::Subtype(trimmed.to_owned())
        }
    }
}

impl From<LungSubtypeFilter> for String {
    fn from(value: LungSubtypeFilter) -> Self {
        match value {
            LungSubtypeFilter::All => "all".to_owned(),
            LungSubtypeFilter::Subtype(s) => s,
        }
    }
}

impl FromStr for LungSubtypeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl fmt::Display for LungSubtypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subtype().unwrap_or("all"))
    }
}

/// One-, three- and five-year shortcuts for the survival threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurvivalLandmark {
    #[serde(rename = "1-Year")]
    OneYear,
    #[serde(rename = "3-Year")]
    ThreeYear,
    #[serde(rename = "5-Year")]
    FiveYear,
}

impl SurvivalLandmark {
    pub const ALL: [SurvivalLandmark; 3] = [
        SurvivalLandmark::OneYear,
        SurvivalLandmark::ThreeYear,
        SurvivalLandmark::FiveYear,
    ];

    #[must_use]
    pub const fn months(self) -> f64 {
        match self {
            SurvivalLandmark::OneYear => 12.0,
            SurvivalLandmark::ThreeYear => 36.0,
            SurvivalLandmark::FiveYear => 60.0,
        }
    }

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            SurvivalLandmark::OneYear => "1-Year",
            SurvivalLandmark::ThreeYear => "3-Year",
            SurvivalLandmark::FiveYear => "5-Year",
        }
    }
}

impl fmt::Display for SurvivalLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl FromStr for SurvivalLandmark {
    type Err = ParseLabelError;

    /// Accepts `1-Year`, `1y`, `1` or the month count `12` (and likewise for 3 and 5).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        let landmark = match label.as_str() {
            "1-year" | "1y" | "1" | "12" => SurvivalLandmark::OneYear,
            "3-year" | "3y" | "3" | "36" => SurvivalLandmark::ThreeYear,
            "5-year" | "5y" | "5" | "60" => SurvivalLandmark::FiveYear,
            _ => return Err(ParseLabelError::new("survival landmark", s)),
        };
        Ok(landmark)
    }
}

/// Every dimension the dashboard filters on, plus the two view cursors that
/// depend on the filtered subset.
///
/// Invariants kept by the methods below:
///
/// - an empty cancer-type selection means *all* types
/// - the lung subtype is `All` unless the selection is exactly `{Lung}`
/// - the survival threshold is finite and non-negative
/// - any change to a filter dimension resets the table page to 1 and the
///   spotlight index to 0
///
/// State read from a preset file may break these; call
/// [`FilterState::normalize`] after deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    selected_cancer_types: BTreeSet<CancerType>,
    lung_subtype: LungSubtypeFilter,
    status: StatusFilter,
    survival_months_min: f64,
    survival_landmark: Option<SurvivalLandmark>,
    selected_stages: BTreeSet<Stage>,
    current_patient_index: usize,
    table_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_cancer_types: BTreeSet::new(),
            lung_subtype: LungSubtypeFilter::All,
            status: StatusFilter::All,
            survival_months_min: 0.0,
            survival_landmark: None,
            selected_stages: Stage::ALL.into_iter().collect(),
            current_patient_index: 0,
            table_page: 1,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn selected_cancer_types(&self) -> &BTreeSet<CancerType> {
        &self.selected_cancer_types
    }

    /// Whether the cancer-type selection is exactly `{Lung}`.
    #[must_use]
    pub fn is_lung_only(&self) -> bool {
        self.selected_cancer_types.len() == 1
            && self.selected_cancer_types.contains(&CancerType::Lung)
    }

    #[must_use]
    pub fn lung_subtype(&self) -> &LungSubtypeFilter {
        &self.lung_subtype
    }

    #[must_use]
    pub fn status(&self) -> StatusFilter {
        self.status
    }

    #[must_use]
    pub fn survival_months_min(&self) -> f64 {
        self.survival_months_min
    }

    #[must_use]
    pub fn survival_landmark(&self) -> Option<SurvivalLandmark> {
        self.survival_landmark
    }

    #[must_use]
    pub fn selected_stages(&self) -> &BTreeSet<Stage> {
        &self.selected_stages
    }

    #[must_use]
    pub fn current_patient_index(&self) -> usize {
        self.current_patient_index
    }

    #[must_use]
    pub fn table_page(&self) -> usize {
        self.table_page
    }

    /// Adds the type to the selection, or removes it if already selected.
    pub fn toggle_cancer_type(&mut self, cancer_type: CancerType) {
        if !self.selected_cancer_types.remove(&cancer_type) {
            self.selected_cancer_types.insert(cancer_type);
        }
        self.filter_changed();
    }

    /// Replaces the selection with a single type, or with "all" for `None`.
    pub fn select_cancer_type(&mut self, cancer_type: Option<CancerType>) {
        self.selected_cancer_types.clear();
        self.selected_cancer_types.extend(cancer_type);
        self.filter_changed();
    }

    pub fn set_cancer_types<I>(&mut self, cancer_types: I)
    where
        I: IntoIterator<Item = CancerType>,
    {
        self.selected_cancer_types = cancer_types.into_iter().collect();
        self.filter_changed();
    }

    /// Sets the lung subtype. Ignored (kept at `All`) unless the selection is `{Lung}`.
    pub fn set_lung_subtype(&mut self, subtype: LungSubtypeFilter) {
        self.lung_subtype = subtype;
        self.filter_changed();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.filter_changed();
    }

    /// Filters by `status`, or back to all when `status` is already active.
    pub fn toggle_status(&mut self, status: VitalStatus) {
        let requested = StatusFilter::from(status);
        self.status = if self.status == requested {
            StatusFilter::All
        } else {
            requested
        };
        self.filter_changed();
    }

    /// Sets the minimum survival in months. Negative or non-finite values become 0.
    pub fn set_survival_months_min(&mut self, months: f64) {
        self.survival_months_min = sanitize_survival_months(months);
        self.survival_landmark = self
            .survival_landmark
            .filter(|l| l.months() == self.survival_months_min);
        self.filter_changed();
    }

    /// Applies a landmark as the survival threshold, or clears it back to 0
    /// when that landmark is already active.
    pub fn toggle_survival_landmark(&mut self, landmark: SurvivalLandmark) {
        if self.survival_landmark == Some(landmark) {
            self.survival_landmark = None;
            self.survival_months_min = 0.0;
        } else {
            self.survival_landmark = Some(landmark);
            self.survival_months_min = landmark.months();
        }
        self.filter_changed();
    }

    pub fn set_stage_included(&mut self, stage: Stage, included: bool) {
        if included {
            self.selected_stages.insert(stage);
        } else {
            self.selected_stages.remove(&stage);
        }
        self.filter_changed();
    }

    /// Includes only `stage`.
    pub fn select_only_stage(&mut self, stage: Stage) {
        self.selected_stages.clear();
        self.selected_stages.insert(stage);
        self.filter_changed();
    }

    pub fn set_stages<I>(&mut self, stages: I)
    where
        I: IntoIterator<Item = Stage>,
    {
        self.selected_stages = stages.into_iter().collect();
        self.filter_changed();
    }

    /// Returns every dimension to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Sets the requested table page. Clamping happens when the page is built.
    pub fn set_table_page(&mut self, page: usize) {
        self.table_page = page;
    }

    pub fn set_current_patient_index(&mut self, index: usize) {
        self.current_patient_index = index;
    }

    /// Restores the invariants on a state built outside the setters.
    pub fn normalize(&mut self) {
        self.survival_months_min = sanitize_survival_months(self.survival_months_min);
        if self
            .survival_landmark
            .is_some_and(|l| l.months() != self.survival_months_min)
        {
            self.survival_landmark = None;
        }
        if !self.is_lung_only() {
            self.lung_subtype = LungSubtypeFilter::All;
        }
        self.table_page = self.table_page.max(1);
    }

    fn filter_changed(&mut self) {
        if !self.is_lung_only() {
            self.lung_subtype = LungSubtypeFilter::All;
        }
        self.table_page = 1;
        self.current_patient_index = 0;
    }
}
