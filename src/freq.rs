use std::collections::BTreeMap;

use crate::store::{CohortStore, Population};

/// Derived per-(sample, population) relative frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeFrequency {
    pub sample_id: String,
    pub population: Population,
    pub count: u64,
    pub total_count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    pub rows: Vec<RelativeFrequency>,
    /// Samples whose counts sum to zero; excluded from `rows` and surfaced
    /// as a data-quality warning instead of dividing by zero.
    pub zero_total_samples: Vec<String>,
}

/// Compute per-sample totals and percentages from the cell count relation.
///
/// Expressed as an aggregate-then-join: the grouped per-sample totals are
/// fully materialized before any percentage is computed, so every row sees
/// a total covering all five of its sample's populations.
pub fn derive(store: &CohortStore) -> FrequencyTable {
    let totals: BTreeMap<String, u64> =
        store.cell_counts().fold(BTreeMap::new(), |mut acc, cc| {
            *acc.entry(cc.sample_id).or_insert(0) += cc.count;
            acc
        });

    let zero_total_samples: Vec<String> = totals
        .iter()
        .filter(|(_, total)| **total == 0)
        .map(|(sample_id, _)| sample_id.clone())
        .collect();

    let rows = store
        .cell_counts()
        .filter_map(|cc| {
            let total_count = *totals.get(&cc.sample_id)?;
            if total_count == 0 {
                return None;
            }
            Some(RelativeFrequency {
                percentage: 100.0 * cc.count as f64 / total_count as f64,
                sample_id: cc.sample_id,
                population: cc.population,
                count: cc.count,
                total_count,
            })
        })
        .collect();

    FrequencyTable {
        rows,
        zero_total_samples,
    }
}
