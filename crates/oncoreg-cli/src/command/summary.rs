use oncoreg_analysis::{
    age_band::AgeBandDistribution,
    breakdown::{AverageSurvivalByType, CriticalWatch, SurvivalByType},
    cancer_stage::{CancerStageMatrix, StageCell},
    dashboard::{DashboardSession, DashboardSnapshot},
    kpi::Kpis,
    stage_status::StageStatusMatrix,
    survival_curve::{LandmarkRates, SurvivalCurveView},
};
use oncoreg_engine::{AgeGroup, Stage, SurvivalLandmark};

use super::{DatasetArg, FilterArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    filter: FilterArg,
    /// Also print the per-type breakdowns and the critical watch list
    #[arg(long)]
    detail: bool,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let state = arg.filter.to_state()?;
    let session = DashboardSession::with_state(store, state);
    let snapshot = session.snapshot();

    println!("Registry Summary");
    println!("================");
    println!(
        "  {} of {} patients match the filter",
        snapshot.filtered_count, snapshot.dataset_size
    );
    println!();

    print_kpis(&snapshot.kpis);
    println!();
    print_distribution(snapshot);
    println!();
    print_survival_curve(&snapshot.survival_curve, &snapshot.landmark_rates);
    println!();
    print_stage_status(&snapshot.stage_status);
    println!();
    print_cancer_stage(&snapshot.cancer_stage);
    println!();
    print_age_bands(&snapshot.age_bands);

    if arg.detail {
        println!();
        print_survival_by_type(&snapshot.survival_by_type);
        println!();
        print_average_by_type(&snapshot.average_by_type);
        println!();
        print_critical_watch(&snapshot.critical_watch);
    }
    Ok(())
}

fn print_kpis(kpis: &Kpis) {
    println!("Headline");
    println!("  {:<24} {:>10}", "Patients", kpis.total);
    println!("  {:<24} {:>10}", "Alive", kpis.alive);
    println!("  {:<24} {:>10}", "Deceased", kpis.deceased);
    println!("  {:<24} {:>9}%", "Survival rate", kpis.survival_rate);
    println!("  {:<24} {:>10.1}", "Avg survival (months)", kpis.avg_survival_months);
    println!(
        "  {:<24} {:>10}",
        "Critical stage",
        format!("{} ({}%)", kpis.critical_stage.stage, kpis.critical_stage.rate)
    );
    println!();
    println!("  {:<12} {:>8} {:>8} {:>8}", "Stage", "Patients", "Alive", "Rate");
    println!("  {}", "-".repeat(39));
    for survival in &kpis.stage_survival {
        println!(
            "  {:<12} {:>8} {:>8} {:>7}%",
            survival.stage.to_str(),
            survival.total,
            survival.survived,
            survival.rate
        );
    }
    println!(
        "  {:<12} {:>8}",
        Stage::Unknown.to_str(),
        kpis.stage_counts.get(Stage::Unknown)
    );
}

fn print_distribution(snapshot: &DashboardSnapshot) {
    let distribution = &snapshot.distribution;
    println!("Cancer Types");
    println!("  {:<12} {:>8} {:>8}", "Type", "Patients", "Share");
    println!("  {}", "-".repeat(30));
    for share in distribution.ranked() {
        println!(
            "  {:<12} {:>8} {:>7.1}%",
            share.cancer_type.to_str(),
            share.count,
            share.percent
        );
    }
    if let Some(top) = distribution.most_common() {
        println!("  Most common: {}", top.cancer_type);
    }
}

fn print_survival_curve(curve: &SurvivalCurveView, landmarks: &LandmarkRates) {
    println!("Survival Curve");
    println!("  {:>8} {:>10}", "Month", "Surviving");
    println!("  {}", "-".repeat(19));
    for point in &curve.points {
        println!("  {:>8.0} {:>9.1}%", point.month, point.percent);
    }
    let rates = SurvivalLandmark::ALL
        .map(|landmark| format!("{landmark} {}%", landmarks.get(landmark)))
        .join(", ");
    println!("  Landmarks: {rates}");
}

fn print_stage_status(matrix: &StageStatusMatrix) {
    println!("Stage by Status");
    println!("  {:<12} {:>8} {:>8}", "Stage", "Alive", "Deceased");
    println!("  {}", "-".repeat(30));
    for (i, stage) in StageStatusMatrix::STAGES.iter().enumerate() {
        println!(
            "  {:<12} {:>8} {:>8}",
            stage.to_str(),
            matrix.alive[i],
            matrix.deceased[i]
        );
    }
    println!("  {:<12} {:>17}", "Total", matrix.total());
}

fn print_cancer_stage(matrix: &CancerStageMatrix) {
    println!("Survival Rate by Cancer Type and Stage");
    print!("  {:<12}", "Type");
    for stage in Stage::RANKED {
        print!(" {:>10}", stage.to_str());
    }
    println!();
    println!("  {}", "-".repeat(12 + 11 * Stage::RANKED.len()));
    for row in &matrix.rows {
        print!("  {:<12}", row.cancer_type.to_str());
        for cell in &row.cells {
            match cell {
                StageCell::NoData => print!(" {:>10}", "-"),
                StageCell::Data { alive, total, rate } => {
                    print!(" {:>10}", format!("{rate:.1}% {alive}/{total}"));
                }
            }
        }
        println!();
    }
}

fn print_age_bands(ages: &AgeBandDistribution) {
    println!("Age at Diagnosis");
    if let Some(reason) = ages.no_data {
        println!("  {}", reason.message());
        return;
    }
    print!("  {:<12}", "Type");
    for group in AgeGroup::ALL {
        print!(" {:>8}", group.to_str());
    }
    println!();
    println!("  {}", "-".repeat(12 + 9 * AgeGroup::ALL.len()));
    for row in &ages.rows {
        print!("  {:<12}", row.cancer_type.to_str());
        for count in row.counts {
            print!(" {count:>8}");
        }
        println!();
    }
    print!("  {:<12}", "Share");
    for share in &ages.shares {
        print!(" {:>7}%", share.percent);
    }
    println!();
    println!("  {} patients with a known age", ages.grand_total);
    for group in AgeGroup::ALL {
        println!("    {:<6} {}", group.to_str(), group.description());
    }
}

fn print_survival_by_type(view: &SurvivalByType) {
    println!("Survival Rate by Cancer Type (overall {:.1}%)", view.overall_rate);
    println!("  {:<12} {:>8} {:>8} {:>8}", "Type", "Alive", "Total", "Rate");
    println!("  {}", "-".repeat(39));
    for row in &view.rows {
        let marker = if row.at_or_above_overall { "" } else { " *" };
        println!(
            "  {:<12} {:>8} {:>8} {:>7.1}%{marker}",
            row.cancer_type.to_str(),
            row.alive,
            row.total,
            row.rate
        );
    }
}

fn print_average_by_type(view: &AverageSurvivalByType) {
    println!(
        "Average Survival by Cancer Type (overall {:.1} months, {})",
        view.overall_months, view.hope
    );
    println!("  {:<12} {:>8} {:>8} {:>8}", "Type", "Patients", "Months", "Years");
    println!("  {}", "-".repeat(39));
    for row in &view.rows {
        println!(
            "  {:<12} {:>8} {:>8.1} {:>8.1}",
            row.cancer_type.to_str(),
            row.count,
            row.avg_months,
            row.avg_years
        );
    }
}

fn print_critical_watch(view: &CriticalWatch) {
    println!(
        "Critical Watch ({} pairs below the overall {:.1}%)",
        view.below_overall_count, view.overall_rate
    );
    println!(
        "  {:<12} {:<10} {:>8} {:>8} {:>8}",
        "Type", "Stage", "Patients", "Alive", "Rate"
    );
    println!("  {}", "-".repeat(50));
    for row in &view.rows {
        let marker = if row.below_overall { " *" } else { "" };
        println!(
            "  {:<12} {:<10} {:>8} {:>8} {:>7.1}%{marker}",
            row.cancer_type.to_str(),
            row.stage.to_str(),
            row.patients,
            row.alive,
            row.rate
        );
    }
}
