//! Box-and-whisker statistics for a bucket population.
//!
//! Quartiles use linear interpolation between closest ranks. Whiskers reach
//! the most extreme observation within 1.5 × IQR of the box; anything
//! further out is an outlier.

const WHISKER_IQR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Observations outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarise a population of per-date counts. `None` when it is empty.
    pub fn from_population(population: &[usize]) -> Option<Self> {
        let mut values: Vec<f64> = population.iter().map(|v| *v as f64).collect();
        values.sort_by(f64::total_cmp);

        let q1 = percentile_sorted(&values, 0.25)?;
        let median = percentile_sorted(&values, 0.5)?;
        let q3 = percentile_sorted(&values, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let whisker_low = values
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3);
        let outliers = values
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(Self {
            n: values.len(),
            min: values[0],
            q1,
            median,
            q3,
            max: values[values.len() - 1],
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

fn percentile_sorted(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() || !pct.is_finite() {
        return None;
    }
    let p = pct.clamp(0.0, 1.0);
    if values.len() == 1 {
        return Some(values[0]);
    }
    let pos = p * ((values.len() - 1) as f64);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let lo_v = values.get(lo).copied()?;
    let hi_v = values.get(hi).copied()?;
    Some(lo_v + (hi_v - lo_v) * (pos - lo as f64))
}
