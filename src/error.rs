use plotters::drawing::DrawingAreaErrorKind;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("DataFrame error: {0}")]
    DataFrame(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Sample generation error: {0}")]
    Sample(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<PolarsError> for AppError {
    fn from(err: PolarsError) -> Self {
        AppError::DataFrame(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for AppError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        AppError::Render(err.to_string())
    }
}
