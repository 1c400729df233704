use oncoreg_engine::{
    PatientRecord, filter,
    pagination::{self, DEFAULT_PAGE_SIZE},
};

use super::{DatasetArg, FilterArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RecordsArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    filter: FilterArg,
    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

pub(crate) fn run(arg: &RecordsArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let state = arg.filter.to_state()?;
    let filtered = filter::apply(store.records(), &state);
    let page = pagination::paginate(&filtered, arg.page_size, state.table_page());

    if page.total_records == 0 {
        println!("No patients match the filter.");
        return Ok(());
    }

    println!(
        "  {:<12} {:<12} {:<20} {:<10} {:<9} {:>8} {:>6}",
        "ID", "Type", "Subtype", "Stage", "Status", "Months", "Age"
    );
    println!("  {}", "-".repeat(83));
    for record in page.records {
        print_record(record);
    }
    println!();
    println!(
        "  Rows {}-{} of {} (page {}/{}{}{})",
        page.first_row(),
        page.last_row(),
        page.total_records,
        page.page,
        page.total_pages,
        if page.has_previous() { ", --page N-1 for previous" } else { "" },
        if page.has_next() { ", --page N+1 for next" } else { "" },
    );
    Ok(())
}

fn print_record(record: &PatientRecord) {
    let age = record
        .age()
        .map_or_else(|| "-".to_owned(), |age| format!("{age:.0}"));
    println!(
        "  {:<12} {:<12} {:<20} {:<10} {:<9} {:>8.1} {:>6}",
        record.id().as_str(),
        record.cancer_type().to_str(),
        record.lung_subtype().unwrap_or("-"),
        record.stage().to_str(),
        record.status().to_str(),
        record.survival_months(),
        age
    );
}
