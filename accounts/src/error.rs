use sea_orm::DbErr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The account is not in a state that allows the requested operation.
    #[error("Data validation error: {0}")]
    DataValidation(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("Fixture error in {path}: {message}")]
    Fixture { path: PathBuf, message: String },
}

impl AccountError {
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation(message.into())
    }

    pub fn is_data_validation(&self) -> bool {
        matches!(self, Self::DataValidation(_))
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
