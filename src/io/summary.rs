use anyhow::Result;

use crate::ctx::Ctx;
use crate::stats;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let subjects = ctx.report.input_meta.subjects.unwrap_or(0);
    let samples = ctx.report.input_meta.samples.unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("cytostat v{}\n", version));
    out.push_str(&format!(
        "Input: {} subjects, {} samples\n",
        subjects, samples
    ));

    for stratum in &ctx.stratum_stats {
        let significant: Vec<String> = stratum
            .rows
            .iter()
            .filter(|row| stats::is_significant(row.p_value))
            .map(|row| format!("{} (p={:.3})", row.population, row.p_value))
            .collect();
        if significant.is_empty() {
            out.push_str(&format!("{}: no significant populations\n", stratum.stratum.label()));
        } else {
            out.push_str(&format!(
                "{}: {}\n",
                stratum.stratum.label(),
                significant.join(", ")
            ));
        }
        if !stratum.skipped.is_empty() {
            let skipped: Vec<&str> = stratum
                .skipped
                .iter()
                .map(|s| s.population.as_str())
                .collect();
            out.push_str(&format!(
                "{}: skipped {}\n",
                stratum.stratum.label(),
                skipped.join(", ")
            ));
        }
    }

    Ok(out)
}
