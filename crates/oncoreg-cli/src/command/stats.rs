use oncoreg_engine::{CancerType, PatientRecord, VitalStatus, filter};
use oncoreg_stats::descriptive::DescriptiveStats;

use super::{DatasetArg, FilterArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    filter: FilterArg,
}

pub(crate) fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let state = arg.filter.to_state()?;
    let filtered = filter::apply(store.records(), &state);

    println!("Survival Months");
    println!("===============");
    print_header();
    print_row("All", &filtered, |_| true);
    for status in VitalStatus::ALL {
        print_row(status.to_str(), &filtered, |r| r.status() == status);
    }
    println!();

    println!("Survival Months by Cancer Type");
    print_header();
    for cancer_type in CancerType::ALL {
        print_row(cancer_type.to_str(), &filtered, |r| {
            r.cancer_type() == cancer_type
        });
    }
    Ok(())
}

fn print_header() {
    println!(
        "  {:<12} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Group", "Count", "Min", "Max", "Mean", "Median", "StdDev"
    );
    println!("  {}", "-".repeat(66));
}

fn print_row<F>(label: &str, records: &[PatientRecord], pred: F)
where
    F: Fn(&PatientRecord) -> bool,
{
    let months = records
        .iter()
        .filter(|r| pred(*r))
        .map(PatientRecord::survival_months);
    match DescriptiveStats::new(months) {
        Some(stats) => println!(
            "  {:<12} {:>8} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>8.1}",
            label, stats.count, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
        ),
        None => println!("  {label:<12} {:>8}", 0),
    }
}
