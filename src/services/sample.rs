use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::AppError;
use crate::models::{Column, ColumnData, Table};

pub const SAMPLE_SEED: u64 = 42;
pub const SAMPLE_ROWS: usize = 1000;
pub const CATEGORIES: [&str; 4] = ["A", "B", "C", "D"];

const VALUE_MEAN: f64 = 100.0;
const VALUE_STD_DEV: f64 = 25.0;
const ACTIVE_PROBABILITY: f64 = 0.7;

/// Builds the 1000-row demo table. Same seed, same table.
pub fn generate_sample() -> Table {
    // Fixed parameters: build_sample cannot fail here.
    build_sample(SAMPLE_SEED, SAMPLE_ROWS).unwrap_or_else(|e| {
        tracing::error!("Sample generation failed: {}", e);
        Table::empty()
    })
}

/// Columns are drawn one after another so each column's stream is stable
/// regardless of how later columns are generated.
pub fn build_sample(seed: u64, rows: usize) -> Result<Table, AppError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let ids: Vec<Option<i64>> = (1..=rows as i64).map(Some).collect();

    let categories: Vec<Option<String>> = (0..rows)
        .map(|_| Some(CATEGORIES[rng.random_range(0..CATEGORIES.len())].to_string()))
        .collect();

    let normal = Normal::new(VALUE_MEAN, VALUE_STD_DEV)
        .map_err(|e| AppError::Sample(format!("Invalid normal distribution: {}", e)))?;
    let values: Vec<Option<f64>> = (0..rows).map(|_| Some(normal.sample(&mut rng))).collect();

    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .ok_or_else(|| AppError::Sample("Invalid start date".to_string()))?;
    let dates = (0..rows as u64)
        .map(|offset| {
            start
                .checked_add_days(Days::new(offset))
                .map(Some)
                .ok_or_else(|| AppError::Sample(format!("Date overflow at day {}", offset)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let active: Vec<Option<bool>> = (0..rows)
        .map(|_| Some(rng.random_bool(ACTIVE_PROBABILITY)))
        .collect();

    let table = Table::new(vec![
        Column::new("id", ColumnData::Integer(ids)),
        Column::new("categoria", ColumnData::Text(categories)),
        Column::new("valor", ColumnData::Float(values)),
        Column::new("data", ColumnData::Date(dates)),
        Column::new("ativo", ColumnData::Boolean(active)),
    ])?;

    tracing::info!("Sample data generated: {:?}", table.shape());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SemanticType;
    use std::collections::HashSet;

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_sample(), generate_sample());
    }

    #[test]
    fn different_seeds_give_different_values() {
        let a = build_sample(1, 50).unwrap();
        let b = build_sample(2, 50).unwrap();
        assert_ne!(a.column("valor"), b.column("valor"));
    }

    #[test]
    fn schema_and_shape() {
        let table = generate_sample();
        assert_eq!(table.shape(), (1000, 5));
        assert_eq!(table.column_names(), vec!["id", "categoria", "valor", "data", "ativo"]);

        let types: Vec<SemanticType> = table.columns().iter().map(|c| c.semantic_type()).collect();
        assert_eq!(
            types,
            vec![
                SemanticType::Integer,
                SemanticType::Text,
                SemanticType::Float,
                SemanticType::Date,
                SemanticType::Boolean,
            ]
        );
        assert!(table.columns().iter().all(|c| c.null_count() == 0));
    }

    #[test]
    fn ids_are_one_through_thousand() {
        let table = generate_sample();
        let ids = table.column("id").unwrap().numeric_values();
        let expected: Vec<f64> = (1..=1000).map(|i| i as f64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn categories_come_from_the_alphabet() {
        let table = generate_sample();
        let seen: HashSet<String> = table.column("categoria").unwrap().labels().into_iter().collect();
        let alphabet: HashSet<String> = CATEGORIES.iter().map(|s| s.to_string()).collect();
        assert!(seen.is_subset(&alphabet));
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn dates_are_consecutive_days() {
        let table = generate_sample();
        let ColumnData::Date(dates) = &table.column("data").unwrap().data else {
            panic!("data column should hold dates");
        };
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(dates[999], NaiveDate::from_ymd_opt(2025, 9, 26));
        assert!(dates.windows(2).all(|w| {
            let (a, b) = (w[0].unwrap(), w[1].unwrap());
            (b - a).num_days() == 1
        }));
    }

    #[test]
    fn values_look_normal() {
        let table = generate_sample();
        let values = table.column("valor").unwrap().numeric_values();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        assert!((95.0..105.0).contains(&mean), "mean {}", mean);
        assert!((22.0..28.0).contains(&std), "std {}", std);
        assert!(values.iter().all(|v| (-75.0..275.0).contains(v)));
    }

    #[test]
    fn active_share_near_seventy_percent() {
        let table = generate_sample();
        let labels = table.column("ativo").unwrap().labels();
        let share = labels.iter().filter(|l| *l == "true").count() as f64 / labels.len() as f64;
        assert!((0.62..0.78).contains(&share), "share {}", share);
    }
}
