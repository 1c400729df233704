use std::path::PathBuf;

use chrono::{DateTime, Utc};
use oncoreg_analysis::dashboard::{DashboardSession, DashboardSnapshot};
use oncoreg_engine::{CancerType, pagination::DEFAULT_PAGE_SIZE};
use serde::Serialize;

use super::{DatasetArg, FilterArg};
use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    filter: FilterArg,
    /// Cancer types shown in the bubble view (comma-separated, default all)
    #[arg(long, value_delimiter = ',')]
    bubble: Vec<CancerType>,
    /// Records per table page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SnapshotExport {
    generated_at: DateTime<Utc>,
    source: PathBuf,
    #[serde(flatten)]
    snapshot: DashboardSnapshot,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let state = arg.filter.to_state()?;

    let mut session = DashboardSession::with_state(store, state);
    session.set_page_size(arg.page_size);
    if !arg.bubble.is_empty() {
        session.clear_bubble_types();
        for &cancer_type in &arg.bubble {
            if !session.bubble_selection().contains(cancer_type) {
                session.toggle_bubble_type(cancer_type);
            }
        }
    }

    let export = SnapshotExport {
        generated_at: Utc::now(),
        source: arg.dataset.data.clone(),
        snapshot: session.into_snapshot(),
    };
    util::write_json(&export, arg.output.as_deref())
}
