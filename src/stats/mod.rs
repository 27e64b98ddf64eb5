use rayon::prelude::*;

use crate::freq::FrequencyTable;
use crate::math::welch::{welch_t_test, WelchSkip};
use crate::query::{self, CohortFilter, CohortRow, TimeFilter};
use crate::store::{CohortStore, Population};

pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Time-from-treatment-start partition over which responder comparisons
/// are computed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stratum {
    Baseline,
    Day7,
    Day14,
    /// Pools day 7 and day 14 (time > 0).
    PostBaseline,
}

impl Stratum {
    pub const ALL: [Stratum; 4] = [
        Stratum::Baseline,
        Stratum::Day7,
        Stratum::Day14,
        Stratum::PostBaseline,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stratum::Baseline => "time0",
            Stratum::Day7 => "time7",
            Stratum::Day14 => "time14",
            Stratum::PostBaseline => "post_baseline",
        }
    }

    pub fn time_filter(&self) -> TimeFilter {
        match self {
            Stratum::Baseline => TimeFilter::Exact(0),
            Stratum::Day7 => TimeFilter::Exact(7),
            Stratum::Day14 => TimeFilter::Exact(14),
            Stratum::PostBaseline => TimeFilter::After(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationStat {
    pub population: Population,
    pub responder_mean: f64,
    pub non_responder_mean: f64,
    pub t_statistic: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedPopulation {
    pub population: Population,
    pub reason: WelchSkip,
}

#[derive(Debug, Clone)]
pub struct StratumStats {
    pub stratum: Stratum,
    pub rows: Vec<PopulationStat>,
    /// Populations with no defined test result, kept separate so a skip is
    /// distinguishable from a non-significant difference.
    pub skipped: Vec<SkippedPopulation>,
}

/// Run the responder comparison for every stratum.
///
/// Strata are independent reads of the same immutable store snapshot, so
/// they are computed in parallel with disjoint output slots.
pub fn compare_all(
    store: &CohortStore,
    frequencies: &FrequencyTable,
    cohort: &CohortFilter,
) -> Vec<StratumStats> {
    Stratum::ALL
        .par_iter()
        .map(|stratum| {
            let filter = cohort.with_time(stratum.time_filter());
            let rows = query::cohort_rows(store, frequencies, &filter);
            compare_stratum(*stratum, &rows)
        })
        .collect()
}

/// Per-population Welch comparison of responder vs non-responder
/// percentages within one stratum's cohort rows.
pub fn compare_stratum(stratum: Stratum, rows: &[CohortRow]) -> StratumStats {
    let mut stats = Vec::new();
    let mut skipped = Vec::new();

    for population in Population::ALL {
        let responders = group_percentages(rows, population, "yes");
        let non_responders = group_percentages(rows, population, "no");
        if responders.is_empty() && non_responders.is_empty() {
            continue;
        }
        match welch_t_test(&responders, &non_responders) {
            Ok(result) => stats.push(PopulationStat {
                population,
                responder_mean: result.mean_a,
                non_responder_mean: result.mean_b,
                t_statistic: result.t_statistic,
                p_value: result.p_value,
            }),
            Err(reason) => skipped.push(SkippedPopulation { population, reason }),
        }
    }

    StratumStats {
        stratum,
        rows: stats,
        skipped,
    }
}

/// Stable ascending sort by p-value; ties keep population order.
pub fn sort_by_p_value(rows: &mut [PopulationStat]) {
    rows.sort_by(|a, b| {
        a.p_value
            .partial_cmp(&b.p_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

pub fn is_significant(p_value: f64) -> bool {
    p_value < SIGNIFICANCE_LEVEL
}

fn group_percentages(rows: &[CohortRow], population: Population, response: &str) -> Vec<f64> {
    rows.iter()
        .filter(|row| row.population == population && row.response == response)
        .map(|row| row.percentage)
        .collect()
}
