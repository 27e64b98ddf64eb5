//! Welch's two-sample t-test for unequal variances.

use statrs::distribution::{ContinuousCDF, StudentsT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchResult {
    pub mean_a: f64,
    pub mean_b: f64,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
}

/// Why a comparison produced no result. Distinct from "not significant".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelchSkip {
    /// Either group has fewer than 2 observations; variance is undefined.
    TooFewObservations,
    /// Both group variances are zero; the standard error degenerates.
    DegenerateVariance,
}

impl WelchSkip {
    pub fn as_str(&self) -> &'static str {
        match self {
            WelchSkip::TooFewObservations => "too_few_observations",
            WelchSkip::DegenerateVariance => "degenerate_variance",
        }
    }
}

/// Welch's t-test between groups `a` and `b`.
///
/// Means and variances are the unbiased sample estimates (divisor n-1);
/// degrees of freedom follow the Satterthwaite-Welch approximation and may
/// be fractional; the p-value is the two-sided tail of Student's t at |t|.
/// The result depends only on the multisets of values, not their order.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchResult, WelchSkip> {
    if a.len() < 2 || b.len() < 2 {
        return Err(WelchSkip::TooFewObservations);
    }
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a = mean(a);
    let mean_b = mean(b);
    let var_a = sample_variance(a, mean_a);
    let var_b = sample_variance(b, mean_b);

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let se_sq = se_a + se_b;
    if se_sq == 0.0 {
        return Err(WelchSkip::DegenerateVariance);
    }

    let t_statistic = (mean_a - mean_b) / se_sq.sqrt();
    let degrees_of_freedom =
        se_sq * se_sq / (se_a * se_a / (n_a - 1.0) + se_b * se_b / (n_b - 1.0));

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|_| WelchSkip::DegenerateVariance)?;
    let p_value = 2.0 * (1.0 - dist.cdf(t_statistic.abs()));

    Ok(WelchResult {
        mean_a,
        mean_b,
        t_statistic,
        degrees_of_freedom,
        p_value,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    sum_sq / (values.len() as f64 - 1.0)
}
