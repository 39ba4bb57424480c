use chrono::{Days, NaiveDate};
use polars::prelude::*;
use std::path::Path;

use crate::error::AppError;
use crate::models::{Column, ColumnData, Table};
use crate::services::sample::generate_sample;

/// Loads `path` as CSV. A missing or unreadable file never surfaces as an
/// error: the sample table is returned instead.
pub fn load(path: impl AsRef<Path>) -> Table {
    let path = path.as_ref();

    if !path.exists() {
        tracing::warn!("Data file {} not found. Generating sample data...", path.display());
        return generate_sample();
    }

    match read_csv(path) {
        Ok(table) => {
            tracing::info!("Data loaded from {}: {:?}", path.display(), table.shape());
            table
        }
        Err(e) => {
            tracing::error!("Failed to load data from {}: {}", path.display(), e);
            generate_sample()
        }
    }
}

pub fn read_csv(path: &Path) -> Result<Table, AppError> {
    let df = CsvReader::from_path(path)?
        .has_header(true)
        .with_try_parse_dates(true)
        .finish()?;

    if df.width() == 0 {
        return Err(AppError::InvalidInput(format!("{} has no columns", path.display())));
    }

    table_from_dataframe(&df)
}

pub fn table_from_dataframe(df: &DataFrame) -> Result<Table, AppError> {
    let columns = df
        .get_columns()
        .iter()
        .map(column_from_series)
        .collect::<Result<Vec<_>, _>>()?;

    Table::new(columns)
}

fn column_from_series(series: &Series) -> Result<Column, AppError> {
    let name = series.name();
    let data = match series.dtype() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let ints = series.cast(&DataType::Int64)?;
            ColumnData::Integer(ints.i64()?.into_iter().collect())
        }
        DataType::Float32 | DataType::Float64 => {
            let floats = series.cast(&DataType::Float64)?;
            // NaN cells are missing values
            ColumnData::Float(
                floats
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()))
                    .collect(),
            )
        }
        DataType::Boolean => ColumnData::Boolean(series.bool()?.into_iter().collect()),
        DataType::Date | DataType::Datetime(_, _) => {
            let days = series.cast(&DataType::Date)?.cast(&DataType::Int32)?;
            let dates = days
                .i32()?
                .into_iter()
                .map(|d| d.map(date_from_epoch_days).transpose())
                .collect::<Result<Vec<_>, _>>()?;
            ColumnData::Date(dates)
        }
        DataType::String => ColumnData::Text(string_values(series)?),
        other => {
            tracing::debug!("Column {} has dtype {:?}, reading it as text", name, other);
            let strings = series.cast(&DataType::String)?;
            ColumnData::Text(string_values(&strings)?)
        }
    };

    Ok(Column::new(name, data))
}

fn string_values(series: &Series) -> Result<Vec<Option<String>>, AppError> {
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn date_from_epoch_days(days: i32) -> Result<NaiveDate, AppError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| AppError::InvalidInput("Invalid epoch".to_string()))?;
    let shifted = if days >= 0 {
        epoch.checked_add_days(Days::new(days as u64))
    } else {
        epoch.checked_sub_days(Days::new(days.unsigned_abs() as u64))
    };
    shifted.ok_or_else(|| AppError::InvalidInput(format!("Date out of range: {} days", days)))
}
