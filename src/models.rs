use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::error::AppError;

/// Declared kind of a column's values. Drives the numeric/categorical
/// partition without looking at the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Integer,
    Float,
    Text,
    Date,
    Boolean,
}

impl SemanticType {
    pub fn is_numeric(self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Float)
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, SemanticType::Text | SemanticType::Boolean)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Text => "text",
            SemanticType::Date => "date",
            SemanticType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Column storage. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
    Boolean(Vec<Option<bool>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self { name: name.into(), data }
    }

    pub fn semantic_type(&self) -> SemanticType {
        match self.data {
            ColumnData::Integer(_) => SemanticType::Integer,
            ColumnData::Float(_) => SemanticType::Float,
            ColumnData::Text(_) => SemanticType::Text,
            ColumnData::Date(_) => SemanticType::Date,
            ColumnData::Boolean(_) => SemanticType::Boolean,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        match &self.data {
            ColumnData::Integer(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Float(v) => v.iter().filter(|x| x.map_or(true, f64::is_nan)).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Date(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Boolean(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Non-missing values as `f64`; NaN counts as missing. Empty for
    /// non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        match &self.data {
            ColumnData::Integer(v) => v.iter().flatten().map(|&x| x as f64).collect(),
            ColumnData::Float(v) => v.iter().flatten().copied().filter(|x| !x.is_nan()).collect(),
            _ => Vec::new(),
        }
    }

    /// Non-missing values rendered as labels. Empty for non-categorical columns.
    pub fn labels(&self) -> Vec<String> {
        match &self.data {
            ColumnData::Text(v) => v.iter().flatten().cloned().collect(),
            ColumnData::Boolean(v) => v.iter().flatten().map(|b| b.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Named, typed columns of equal length. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(AppError::InvalidInput(format!("Duplicate column name: {}", column.name)));
            }
        }

        if let Some(first) = columns.first() {
            let height = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != height) {
                return Err(AppError::InvalidInput(format!(
                    "Column {} has {} rows, expected {}",
                    bad.name,
                    bad.len(),
                    height
                )));
            }
        }

        Ok(Self { columns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    /// Sorted by descending count.
    pub counts: Vec<ValueCount>,
}

impl CategoricalSummary {
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.counts.iter().find(|vc| vc.value == value).map(|vc| vc.count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub dtypes: Vec<(String, SemanticType)>,
    pub missing_values: Vec<(String, usize)>,
    /// Absent when the table has no numeric column.
    pub numeric_summary: Option<Vec<NumericSummary>>,
    pub categorical_summary: Vec<CategoricalSummary>,
}

impl AnalysisResult {
    pub fn numeric(&self, column: &str) -> Option<&NumericSummary> {
        self.numeric_summary
            .as_ref()?
            .iter()
            .find(|s| s.column == column)
    }

    pub fn categorical(&self, column: &str) -> Option<&CategoricalSummary> {
        self.categorical_summary.iter().find(|s| s.column == column)
    }

    pub fn total_missing(&self) -> usize {
        self.missing_values.iter().map(|(_, n)| n).sum()
    }
}
