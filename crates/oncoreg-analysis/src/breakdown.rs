//! Per-type detail tables: survival rates, average survival and the critical
//! watch list.

use std::{collections::BTreeSet, fmt};

use oncoreg_engine::{CancerType, PatientRecord, Stage};
use oncoreg_stats::rate;
use serde::Serialize;

fn present_types(records: &[PatientRecord]) -> BTreeSet<CancerType> {
    records.iter().map(PatientRecord::cancer_type).collect()
}

fn alive_count<'a, I>(records: I) -> (usize, usize)
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    records
        .into_iter()
        .fold((0, 0), |(alive, total), r| (alive + usize::from(r.is_alive()), total + 1))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSurvivalRow {
    pub cancer_type: CancerType,
    pub alive: usize,
    pub total: usize,
    /// Percent, one decimal.
    pub rate: f64,
    /// Whether `rate` is at or above the overall rate.
    pub at_or_above_overall: bool,
}

/// Survival rate of each type in the subset, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalByType {
    /// Percent, one decimal.
    pub overall_rate: f64,
    pub rows: Vec<TypeSurvivalRow>,
}

impl SurvivalByType {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let (alive, total) = alive_count(records);
        let overall_rate = rate::round_to(rate::percentage(alive, total), 1);

        let mut rows = present_types(records)
            .into_iter()
            .map(|cancer_type| {
                let (alive, total) =
                    alive_count(records.iter().filter(|r| r.cancer_type() == cancer_type));
                let rate = rate::round_to(rate::percentage(alive, total), 1);
                TypeSurvivalRow {
                    cancer_type,
                    alive,
                    total,
                    rate,
                    at_or_above_overall: rate >= overall_rate,
                }
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.rate.total_cmp(&a.rate));

        Self { overall_rate, rows }
    }
}

/// Coarse reading of the average survival of the subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HopeLevel {
    CourageRequired,
    FightingSpirit,
    StrongHope,
}

impl HopeLevel {
    /// Classifies an average survival in months: under one year, under two
    /// years, or longer.
    ///
    /// ```
    /// # use oncoreg_analysis::breakdown::HopeLevel;
    /// assert_eq!(HopeLevel::from_avg_months(8.0), HopeLevel::CourageRequired);
    /// assert_eq!(HopeLevel::from_avg_months(12.0), HopeLevel::FightingSpirit);
    /// assert_eq!(HopeLevel::from_avg_months(24.0), HopeLevel::StrongHope);
    /// ```
    #[must_use]
    pub fn from_avg_months(months: f64) -> Self {
        if months < 12.0 {
            HopeLevel::CourageRequired
        } else if months < 24.0 {
            HopeLevel::FightingSpirit
        } else {
            HopeLevel::StrongHope
        }
    }

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            HopeLevel::CourageRequired => "Courage Required",
            HopeLevel::FightingSpirit => "Fighting Spirit",
            HopeLevel::StrongHope => "Strong Hope",
        }
    }
}

impl fmt::Display for HopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAverageRow {
    pub cancer_type: CancerType,
    pub count: usize,
    pub avg_months: f64,
    /// Years, one decimal.
    pub avg_years: f64,
}

/// Average survival of each type in the subset, longest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageSurvivalByType {
    /// Months, one decimal.
    pub overall_months: f64,
    /// Years, one decimal.
    pub overall_years: f64,
    pub hope: HopeLevel,
    pub rows: Vec<TypeAverageRow>,
}

impl AverageSurvivalByType {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let overall_months = rate::round_to(
            rate::mean_or_zero(records.iter().map(PatientRecord::survival_months)),
            1,
        );

        let mut rows = present_types(records)
            .into_iter()
            .map(|cancer_type| {
                let months = records
                    .iter()
                    .filter(|r| r.cancer_type() == cancer_type)
                    .map(PatientRecord::survival_months)
                    .collect::<Vec<_>>();
                let avg_months = rate::mean_or_zero(months.iter().copied());
                TypeAverageRow {
                    cancer_type,
                    count: months.len(),
                    avg_months,
                    avg_years: rate::round_to(avg_months / 12.0, 1),
                }
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.avg_months.total_cmp(&a.avg_months));

        Self {
            overall_months,
            overall_years: rate::round_to(overall_months / 12.0, 1),
            hope: HopeLevel::from_avg_months(overall_months),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalWatchRow {
    pub cancer_type: CancerType,
    pub stage: Stage,
    pub patients: usize,
    pub alive: usize,
    pub rate: f64,
    pub below_overall: bool,
}

/// Every (cancer type, ranked stage) pair with patients, lowest rate first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalWatch {
    pub overall_rate: f64,
    pub rows: Vec<CriticalWatchRow>,
    pub below_overall_count: usize,
}

impl CriticalWatch {
    #[must_use]
    pub fn compute(records: &[PatientRecord]) -> Self {
        let (alive, total) = alive_count(records);
        let overall_rate = rate::percentage(alive, total);

        let mut rows = present_types(records)
            .into_iter()
            .flat_map(|cancer_type| {
                Stage::RANKED.into_iter().filter_map(move |stage| {
                    let (alive, patients) = alive_count(
                        records
                            .iter()
                            .filter(|r| r.cancer_type() == cancer_type && r.stage() == stage),
                    );
                    (patients > 0).then(|| {
                        let rate = rate::percentage(alive, patients);
                        CriticalWatchRow {
                            cancer_type,
                            stage,
                            patients,
                            alive,
                            rate,
                            below_overall: rate < overall_rate,
                        }
                    })
                })
            })
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| a.rate.total_cmp(&b.rate));
        let below_overall_count = rows.iter().filter(|r| r.below_overall).count();

        Self {
            overall_rate,
            rows,
            below_overall_count,
        }
    }
}
