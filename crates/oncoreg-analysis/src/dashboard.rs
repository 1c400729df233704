//! Dashboard orchestration.
//!
//! [`DashboardSnapshot`] bundles every view for one filter state.
//! [`DashboardSession`] owns the dataset, the filter state and the bubble
//! selection, and keeps the snapshot current.
//!
//! # Recompute rules
//!
//! | Operation | Filter engine | Views recomputed |
//! |---|---|---|
//! | Any filter mutation | yes | all |
//! | Table page change | no | table page |
//! | Spotlight navigation or shuffle | no | spotlight |
//! | Bubble selection change | no | bubble view |
//!
//! Observers registered with [`DashboardSession::subscribe`] are told about
//! each recompute through [`DashboardObserver`].

use std::{fmt, time::Instant};

use oncoreg_engine::{
    CancerType, FilterState, LungSubtypeFilter, PatientRecord, RecordStore, Stage, StatusFilter,
    SurvivalLandmark, VitalStatus, filter,
    pagination::{self, DEFAULT_PAGE_SIZE, Page},
    spotlight,
};
use rand::Rng;
use serde::Serialize;

use crate::{
    age_band::AgeBandDistribution,
    breakdown::{AverageSurvivalByType, CriticalWatch, SurvivalByType},
    bubble::{BubbleSelection, BubbleView},
    cancer_stage::CancerStageMatrix,
    distribution::CancerTypeDistribution,
    kpi::Kpis,
    profile::PatientProfile,
    stage_status::StageStatusMatrix,
    survival_curve::{LandmarkRates, SurvivalCurveView},
};

/// Owned copy of one page of the patient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub page_size: usize,
    pub records: Vec<PatientRecord>,
}

impl From<Page<'_>> for TablePage {
    fn from(page: Page<'_>) -> Self {
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_records: page.total_records,
            page_size: page.page_size,
            records: page.records.to_vec(),
        }
    }
}

/// Every view of the dashboard for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub filter: FilterState,
    pub bubble_selection: BubbleSelection,
    pub dataset_size: usize,
    pub filtered_count: usize,
    pub kpis: Kpis,
    pub distribution: CancerTypeDistribution,
    pub survival_curve: SurvivalCurveView,
    pub landmark_rates: LandmarkRates,
    pub stage_status: StageStatusMatrix,
    pub cancer_stage: CancerStageMatrix,
    pub age_bands: AgeBandDistribution,
    pub bubble: BubbleView,
    pub survival_by_type: SurvivalByType,
    pub average_by_type: AverageSurvivalByType,
    pub critical_watch: CriticalWatch,
    pub spotlight: Option<PatientProfile>,
    pub table: TablePage,
}

impl DashboardSnapshot {
    /// Computes every view from `filtered`, which must be
    /// `filter::apply(store.records(), state)`.
    #[must_use]
    pub fn compute(
        store: &RecordStore,
        filtered: &[PatientRecord],
        state: &FilterState,
        bubble_selection: &BubbleSelection,
        page_size: usize,
    ) -> Self {
        let all = store.records();
        let min_months = state.survival_months_min();
        let baseline = filter::apply_baseline(all, state);

        Self {
            filter: state.clone(),
            bubble_selection: bubble_selection.clone(),
            dataset_size: all.len(),
            filtered_count: filtered.len(),
            kpis: Kpis::compute(filtered),
            distribution: CancerTypeDistribution::compute(filtered),
            survival_curve: SurvivalCurveView::compute(filtered, min_months),
            landmark_rates: LandmarkRates::compute(&baseline),
            stage_status: StageStatusMatrix::compute(filtered),
            cancer_stage: CancerStageMatrix::compute(filtered),
            age_bands: AgeBandDistribution::compute(filtered, store.has_age_data()),
            bubble: BubbleView::compute(filtered, bubble_selection, min_months),
            survival_by_type: SurvivalByType::compute(filtered),
            average_by_type: AverageSurvivalByType::compute(filtered),
            critical_watch: CriticalWatch::compute(filtered),
            spotlight: PatientProfile::build(filtered, state.current_patient_index(), all),
            table: pagination::paginate(filtered, page_size, state.table_page()).into(),
        }
    }
}

/// Receives recomputed views from a [`DashboardSession`].
///
/// Only [`snapshot_ready`] is required; the partial updates default to no-ops.
///
/// [`snapshot_ready`]: Self::snapshot_ready
pub trait DashboardObserver: fmt::Debug {
    /// Called after a filter change, with every view recomputed.
    fn snapshot_ready(&mut self, snapshot: &DashboardSnapshot);

    /// Called after a bubble-selection change. Nothing else was recomputed.
    fn bubble_ready(&mut self, bubble: &BubbleView) {
        let _ = bubble;
    }

    /// Called after a table page change.
    fn table_ready(&mut self, table: &TablePage) {
        let _ = table;
    }

    /// Called after the spotlight moved.
    fn spotlight_ready(&mut self, profile: Option<&PatientProfile>) {
        let _ = profile;
    }
}

/// Mutable dashboard state plus its latest snapshot.
#[derive(Debug)]
pub struct DashboardSession {
    store: RecordStore,
    state: FilterState,
    bubble_selection: BubbleSelection,
    page_size: usize,
    filtered: Vec<PatientRecord>,
    snapshot: DashboardSnapshot,
    observers: Vec<Box<dyn DashboardObserver>>,
}

impl DashboardSession {
    #[must_use]
    pub fn new(store: RecordStore) -> Self {
        Self::with_state(store, FilterState::default())
    }

    /// Starts a session from a preset filter state.
    #[must_use]
    pub fn with_state(store: RecordStore, mut state: FilterState) -> Self {
        state.normalize();
        let bubble_selection = BubbleSelection::default();
        let filtered = filter::apply(store.records(), &state);
        clamp_cursors(&mut state, filtered.len(), DEFAULT_PAGE_SIZE);
        let snapshot =
            DashboardSnapshot::compute(&store, &filtered, &state, &bubble_selection, DEFAULT_PAGE_SIZE);
        Self {
            store,
            state,
            bubble_selection,
            page_size: DEFAULT_PAGE_SIZE,
            filtered,
            snapshot,
            observers: vec![],
        }
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    #[must_use]
    pub fn filtered(&self) -> &[PatientRecord] {
        &self.filtered
    }

    #[must_use]
    pub fn bubble_selection(&self) -> &BubbleSelection {
        &self.bubble_selection
    }

    #[must_use]
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot
    }

    pub fn subscribe(&mut self, observer: Box<dyn DashboardObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the dataset, keeping the filter dimensions. The table and
    /// spotlight cursors go back to the start.
    pub fn replace_store(&mut self, store: RecordStore) {
        self.store = store;
        self.state.set_table_page(1);
        self.state.set_current_patient_index(0);
        self.refresh();
    }

    /// Replaces the whole filter state, as when a preset is applied.
    pub fn set_filter_state(&mut self, mut state: FilterState) {
        state.normalize();
        self.state = state;
        self.refresh();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.refresh_table();
    }

    pub fn toggle_cancer_type(&mut self, cancer_type: CancerType) {
        self.update_filter(|s| s.toggle_cancer_type(cancer_type));
    }

    /// Filters to one cancer type, or all for `None`. The bubble view follows
    /// the same selection.
    pub fn select_cancer_type(&mut self, cancer_type: Option<CancerType>) {
        self.bubble_selection = cancer_type.map_or_else(BubbleSelection::all, BubbleSelection::only);
        self.update_filter(|s| s.select_cancer_type(cancer_type));
    }

    pub fn set_lung_subtype(&mut self, subtype: LungSubtypeFilter) {
        self.update_filter(|s| s.set_lung_subtype(subtype));
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.update_filter(|s| s.set_status(status));
    }

    pub fn toggle_status(&mut self, status: VitalStatus) {
        self.update_filter(|s| s.toggle_status(status));
    }

    pub fn set_survival_months_min(&mut self, months: f64) {
        self.update_filter(|s| s.set_survival_months_min(months));
    }

    pub fn toggle_survival_landmark(&mut self, landmark: SurvivalLandmark) {
        self.update_filter(|s| s.toggle_survival_landmark(landmark));
    }

    pub fn set_stage_included(&mut self, stage: Stage, included: bool) {
        self.update_filter(|s| s.set_stage_included(stage, included));
    }

    pub fn select_only_stage(&mut self, stage: Stage) {
        self.update_filter(|s| s.select_only_stage(stage));
    }

    pub fn reset(&mut self) {
        self.update_filter(FilterState::reset);
    }

    /// Moves to a table page, clamped into range. Does not re-run the filter.
    pub fn set_table_page(&mut self, page: usize) {
        self.state.set_table_page(page);
        self.refresh_table();
    }

    pub fn next_page(&mut self) {
        self.set_table_page(self.snapshot.table.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_table_page(self.snapshot.table.page.saturating_sub(1));
    }

    /// Moves the spotlight by `delta`, wrapping at both ends.
    pub fn navigate_spotlight(&mut self, delta: isize) {
        let index = spotlight::step_index(self.state.current_patient_index(), delta, self.filtered.len());
        self.state.set_current_patient_index(index);
        self.refresh_spotlight();
    }

    /// Jumps the spotlight to a random different patient.
    pub fn shuffle_spotlight<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let index = spotlight::shuffle_index(rng, self.state.current_patient_index(), self.filtered.len());
        self.state.set_current_patient_index(index);
        self.refresh_spotlight();
    }

    pub fn toggle_bubble_type(&mut self, cancer_type: CancerType) {
        self.bubble_selection.toggle(cancer_type);
        self.refresh_bubble();
    }

    pub fn select_all_bubble_types(&mut self) {
        self.bubble_selection.select_all();
        self.refresh_bubble();
    }

    pub fn clear_bubble_types(&mut self) {
        self.bubble_selection.clear();
        self.refresh_bubble();
    }

    fn update_filter<F>(&mut self, f: F)
    where
        F: FnOnce(&mut FilterState),
    {
        f(&mut self.state);
        self.refresh();
    }

    fn refresh(&mut self) {
        let start = Instant::now();
        self.filtered = filter::apply(self.store.records(), &self.state);
        clamp_cursors(&mut self.state, self.filtered.len(), self.page_size);
        self.snapshot = DashboardSnapshot::compute(
            &self.store,
            &self.filtered,
            &self.state,
            &self.bubble_selection,
            self.page_size,
        );
        log::debug!(
            "recomputed dashboard: {}/{} records in {:.2?}",
            self.filtered.len(),
            self.store.len(),
            start.elapsed()
        );
        for observer in &mut self.observers {
            observer.snapshot_ready(&self.snapshot);
        }
    }

    fn refresh_table(&mut self) {
        let page = pagination::paginate(&self.filtered, self.page_size, self.state.table_page());
        self.state.set_table_page(page.page);
        self.snapshot.table = page.into();
        self.snapshot.filter = self.state.clone();
        for observer in &mut self.observers {
            observer.table_ready(&self.snapshot.table);
        }
    }

    fn refresh_spotlight(&mut self) {
        self.snapshot.spotlight = PatientProfile::build(
            &self.filtered,
            self.state.current_patient_index(),
            self.store.records(),
        );
        self.snapshot.filter = self.state.clone();
        for observer in &mut self.observers {
            observer.spotlight_ready(self.snapshot.spotlight.as_ref());
        }
    }

    fn refresh_bubble(&mut self) {
        self.snapshot.bubble = BubbleView::compute(
            &self.filtered,
            &self.bubble_selection,
            self.state.survival_months_min(),
        );
        self.snapshot.bubble_selection = self.bubble_selection.clone();
        for observer in &mut self.observers {
            observer.bubble_ready(&self.snapshot.bubble);
        }
    }
}

/// Pulls the table page and spotlight index into range for `len` records.
fn clamp_cursors(state: &mut FilterState, len: usize, page_size: usize) {
    let pages = pagination::total_pages(len, page_size);
    state.set_table_page(state.table_page().clamp(1, pages));
    state.set_current_patient_index(spotlight::clamp_index(state.current_patient_index(), len));
}
