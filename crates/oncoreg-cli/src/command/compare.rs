use oncoreg_analysis::comparison::{self, ComparisonResult, TypeSummary};
use oncoreg_engine::CancerType;

use super::DatasetArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// First cancer type
    #[arg(long)]
    a: CancerType,
    /// Second cancer type
    #[arg(long)]
    b: CancerType,
    /// Print the survival curves of both types
    #[arg(long)]
    curves: bool,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let Some(result) = comparison::compare(store.records(), Some(arg.a), Some(arg.b)) else {
        anyhow::bail!("pick two different cancer types to compare");
    };

    println!("{} vs {}", result.a.cancer_type, result.b.cancer_type);
    println!("==========================================");
    print_summaries(&result);
    println!();
    println!("  {}", result.insight());

    if arg.curves {
        println!();
        print_curves(&result.a, &result.b);
    }
    Ok(())
}

fn print_summaries(result: &ComparisonResult) {
    let (a, b) = (&result.a, &result.b);
    println!(
        "  {:<20} {:>12} {:>12}",
        "",
        a.cancer_type.to_str(),
        b.cancer_type.to_str()
    );
    println!("  {}", "-".repeat(46));
    println!("  {:<20} {:>12} {:>12}", "Patients", a.count, b.count);
    println!("  {:<20} {:>12} {:>12}", "Alive", a.alive, b.alive);
    println!(
        "  {:<20} {:>11.1}% {:>11.1}%",
        "Survival rate", a.survival_rate, b.survival_rate
    );
    println!(
        "  {:<20} {:>12} {:>12}",
        "Avg survival (mo)", a.avg_months, b.avg_months
    );
    let winner = result
        .winner
        .map_or_else(|| "tie".to_owned(), |w| w.to_string());
    println!(
        "  {:<20} {:>12}  (gap {:.1} pp, {} months)",
        "Better outcome", winner, result.rate_gap, result.months_gap
    );
}

fn print_curves(a: &TypeSummary, b: &TypeSummary) {
    println!("  {:>8} {:>12} {:>12}", "Month", a.cancer_type.to_str(), b.cancer_type.to_str());
    println!("  {}", "-".repeat(34));
    for (pa, pb) in a.curve.points.iter().zip(&b.curve.points) {
        println!("  {:>8.0} {:>11.1}% {:>11.1}%", pa.month, pa.percent, pb.percent);
    }
}
