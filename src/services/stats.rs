use polars::prelude::*;
use std::collections::HashMap;

use crate::models::{NumericSummary, ValueCount};

/// Count, mean, sample std (n - 1) and linearly interpolated quartiles,
/// computed by polars over the given values.
pub fn describe(column: &str, values: &[f64]) -> NumericSummary {
    let ca = Float64Chunked::from_slice(column, values);

    NumericSummary {
        column: column.to_string(),
        count: values.len(),
        mean: ca.mean(),
        std: if values.len() < 2 { None } else { ca.std(1) },
        min: ca.min(),
        q25: quantile(&ca, 0.25),
        median: quantile(&ca, 0.5),
        q75: quantile(&ca, 0.75),
        max: ca.max(),
    }
}

fn quantile(ca: &Float64Chunked, q: f64) -> Option<f64> {
    ca.quantile(q, QuantileInterpolOptions::Linear)
        .unwrap_or_else(|e| {
            tracing::warn!("Quantile {} of {} failed: {}", q, ca.name(), e);
            None
        })
}

/// Frequency table, most frequent first; ties keep first-seen order.
pub fn value_counts<I, S>(labels: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for label in labels {
        let label = label.into();
        match first_seen.get(&label) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                first_seen.insert(label.clone(), counts.len());
                counts.push(ValueCount { value: label, count: 1 });
            }
        }
    }

    // Stable sort keeps insertion order among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
