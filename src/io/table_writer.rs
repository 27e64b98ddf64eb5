//! CSV export tables. Column names and casing are a contract with the
//! presentation layer.

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::freq::RelativeFrequency;
use crate::stats::{self, PopulationStat};

pub fn write_relative_frequencies(path: &Path, rows: &[RelativeFrequency]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "sample_id,population,count,total_count,percentage")?;
    for row in rows {
        writeln!(
            w,
            "{},{},{},{},{:.6}",
            row.sample_id, row.population, row.count, row.total_count, row.percentage
        )?;
    }
    Ok(())
}

/// Stat rows sorted ascending by p-value, marked significant at p < 0.05.
pub fn write_population_stats(path: &Path, rows: &[PopulationStat]) -> Result<()> {
    let mut sorted = rows.to_vec();
    stats::sort_by_p_value(&mut sorted);

    let mut w = create(path)?;
    writeln!(
        w,
        "population,responder_mean,non_responder_mean,t_statistic,p_value,significant"
    )?;
    for row in &sorted {
        writeln!(
            w,
            "{},{:.6},{:.6},{:.6},{:.6},{}",
            row.population,
            row.responder_mean,
            row.non_responder_mean,
            row.t_statistic,
            row.p_value,
            stats::is_significant(row.p_value)
        )?;
    }
    Ok(())
}

pub fn write_baseline_samples(path: &Path, sample_ids: &[String]) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "sample_id")?;
    for sample_id in sample_ids {
        writeln!(w, "{}", sample_id)?;
    }
    Ok(())
}

pub fn write_group_counts(
    path: &Path,
    key_header: &str,
    count_header: &str,
    rows: &[(String, u64)],
) -> Result<()> {
    let mut w = create(path)?;
    writeln!(w, "{},{}", key_header, count_header)?;
    for (key, count) in rows {
        writeln!(w, "{},{}", key, count)?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
