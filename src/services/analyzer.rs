use crate::models::{AnalysisResult, CategoricalSummary, Table};
use crate::services::stats::{describe, value_counts};

/// Descriptive statistics over `table`. Any table is valid input,
/// including one with no rows or no columns.
pub fn analyze(table: &Table) -> AnalysisResult {
    let (numeric, categorical): (Vec<_>, Vec<_>) = table
        .columns()
        .iter()
        .filter(|c| c.semantic_type().is_numeric() || c.semantic_type().is_categorical())
        .partition(|c| c.semantic_type().is_numeric());

    tracing::debug!(
        "Analyzing {:?}: {} numeric, {} categorical columns",
        table.shape(),
        numeric.len(),
        categorical.len()
    );

    let numeric_summary = if numeric.is_empty() {
        None
    } else {
        Some(
            numeric
                .iter()
                .map(|c| describe(&c.name, &c.numeric_values()))
                .collect(),
        )
    };

    let categorical_summary = categorical
        .iter()
        .map(|c| CategoricalSummary {
            column: c.name.clone(),
            counts: value_counts(c.labels()),
        })
        .collect();

    let result = AnalysisResult {
        shape: table.shape(),
        columns: table.column_names(),
        dtypes: table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.semantic_type()))
            .collect(),
        missing_values: table
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.null_count()))
            .collect(),
        numeric_summary,
        categorical_summary,
    };

    tracing::info!("Analysis finished for {:?}", result.shape);
    result
}
