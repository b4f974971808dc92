use thiserror::Error;

use crate::external::spend_source::SpendSourceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data source error: {0}")]
    Source(SpendSourceError),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<SpendSourceError> for AppError {
    fn from(value: SpendSourceError) -> Self {
        AppError::Source(value)
    }
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::Validation(value)
    }
}
