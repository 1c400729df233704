use oncoreg_analysis::{dashboard::DashboardSession, profile::PatientProfile};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use super::{DatasetArg, FilterArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SpotlightArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    filter: FilterArg,
    /// Steps to move from the starting index (negative moves back, wrapping)
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    step: isize,
    /// Jump to a random different patient
    #[arg(long, conflicts_with = "step")]
    shuffle: bool,
    /// Seed for --shuffle
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &SpotlightArg) -> anyhow::Result<()> {
    let store = arg.dataset.load();
    let state = arg.filter.to_state()?;
    let mut session = DashboardSession::with_state(store, state);

    if arg.shuffle {
        match arg.seed {
            Some(seed) => session.shuffle_spotlight(&mut Pcg32::seed_from_u64(seed)),
            None => session.shuffle_spotlight(&mut rand::rng()),
        }
    } else if arg.step != 0 {
        session.navigate_spotlight(arg.step);
    }

    match &session.snapshot().spotlight {
        Some(profile) => print_profile(profile),
        None => println!("No patients match the filter."),
    }
    Ok(())
}

fn print_profile(profile: &PatientProfile) {
    let record = &profile.record;
    println!(
        "Patient {} ({} of {})",
        record.id(),
        profile.position,
        profile.total
    );
    println!("==========================================");
    println!("  {:<16} {}", "Cancer", profile.cancer_label);
    println!("  {:<16} {}", "Stage", record.stage());
    println!("  {:<16} {}", "Status", record.status());
    println!("  {:<16} {}", "Survival", profile.duration_text);
    if let Some(group) = record.age_group() {
        println!("  {:<16} {group}", "Age group");
    }
    println!(
        "  {:<16} {} (type average {:.1} months)",
        "Prognosis", profile.prognosis_text, profile.type_average_months
    );
    println!();
    println!("  {}", profile.narrative);
}
