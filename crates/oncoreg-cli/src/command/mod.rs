use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oncoreg_engine::{
    CancerType, FilterState, LungSubtypeFilter, RecordStore, Stage, StatusFilter, SurvivalLandmark,
};

use crate::{loader, util};

use self::{
    compare::CompareArg, export::ExportArg, records::RecordsArg, spotlight::SpotlightArg,
    stats::StatsArg, summary::SummaryArg,
};

mod compare;
mod export;
mod records;
mod spotlight;
mod stats;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do with the registry
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print the dashboard views for the filtered subset
    Summary(#[clap(flatten)] SummaryArg),
    /// Write the full dashboard snapshot as JSON
    Export(#[clap(flatten)] ExportArg),
    /// Compare two cancer types over the whole dataset
    Compare(#[clap(flatten)] CompareArg),
    /// List one page of the filtered records
    Records(#[clap(flatten)] RecordsArg),
    /// Show the spotlight patient
    Spotlight(#[clap(flatten)] SpotlightArg),
    /// Descriptive statistics of survival months
    Stats(#[clap(flatten)] StatsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Records(arg) => records::run(&arg)?,
        Mode::Spotlight(arg) => spotlight::run(&arg)?,
        Mode::Stats(arg) => stats::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the registry CSV file
    pub data: PathBuf,

    /// Path to the JSON sidecar mapping patient ids to ages
    #[arg(long)]
    pub ages: Option<PathBuf>,
}

impl DatasetArg {
    pub fn load(&self) -> RecordStore {
        loader::load_store(&self.data, self.ages.as_deref())
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct FilterArg {
    /// JSON filter preset; the flags below are applied on top of it
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Cancer types to include (comma-separated, default all)
    #[arg(long, value_delimiter = ',')]
    pub cancer: Vec<CancerType>,

    /// Lung subtype, only effective when the selection is exactly Lung
    #[arg(long)]
    pub lung_subtype: Option<LungSubtypeFilter>,

    /// Vital status: all, alive or deceased
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Minimum survival in months
    #[arg(long)]
    pub min_months: Option<f64>,

    /// Survival landmark shortcut (1-year, 3-year or 5-year)
    #[arg(long, conflicts_with = "min_months")]
    pub landmark: Option<SurvivalLandmark>,

    /// Stages to include (comma-separated, default all)
    #[arg(long, value_delimiter = ',')]
    pub stages: Vec<Stage>,

    /// Table page (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Spotlight index into the filtered subset (0-based)
    #[arg(long)]
    pub index: Option<usize>,
}

impl FilterArg {
    /// Builds the filter state from the preset, then the flags.
    pub fn to_state(&self) -> anyhow::Result<FilterState> {
        let mut state = match &self.preset {
            Some(path) => util::read_preset(path)?,
            None => FilterState::default(),
        };
        self.apply(&mut state);
        Ok(state)
    }

    fn apply(&self, state: &mut FilterState) {
        if !self.cancer.is_empty() {
            state.set_cancer_types(self.cancer.iter().copied());
        }
        if let Some(subtype) = &self.lung_subtype {
            state.set_lung_subtype(subtype.clone());
        }
        if let Some(status) = self.status {
            state.set_status(status);
        }
        if let Some(months) = self.min_months {
            state.set_survival_months_min(months);
        }
        if let Some(landmark) = self.landmark
            && state.survival_landmark() != Some(landmark)
        {
            state.toggle_survival_landmark(landmark);
        }
        if !self.stages.is_empty() {
            state.set_stages(self.stages.iter().copied());
        }
        // Filter setters rewind the cursors, so these go last.
        if let Some(page) = self.page {
            state.set_table_page(page);
        }
        if let Some(index) = self.index {
            state.set_current_patient_index(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> FilterArg {
        #[derive(Debug, Parser)]
        struct Wrapper {
            #[clap(flatten)]
            filter: FilterArg,
        }
        let argv = std::iter::once("oncoreg").chain(args.iter().copied());
        Wrapper::parse_from(argv).filter
    }

    #[test]
    fn test_flags_build_state() {
        let arg = parse(&[
            "--cancer",
            "Lung",
            "--lung-subtype",
            "Adenocarcinoma",
            "--status",
            "alive",
            "--landmark",
            "3-year",
            "--stages",
            "Stage I,Stage II",
            "--page",
            "3",
        ]);
        let state = arg.to_state().unwrap();
        assert!(state.is_lung_only());
        assert_eq!(state.lung_subtype().subtype(), Some("Adenocarcinoma"));
        assert_eq!(state.status(), StatusFilter::Alive);
        assert_eq!(state.survival_months_min(), 36.0);
        assert_eq!(state.survival_landmark(), Some(SurvivalLandmark::ThreeYear));
        assert_eq!(state.selected_stages().len(), 2);
        assert_eq!(state.table_page(), 3);
    }

    #[test]
    fn test_subtype_dropped_for_mixed_selection() {
        let arg = parse(&["--cancer", "Lung,Breast", "--lung-subtype", "Squamous"]);
        let state = arg.to_state().unwrap();
        assert_eq!(state.lung_subtype(), &LungSubtypeFilter::All);
    }

    #[test]
    fn test_no_flags_is_default() {
        let state = parse(&[]).to_state().unwrap();
        assert_eq!(state, FilterState::default());
    }
}
