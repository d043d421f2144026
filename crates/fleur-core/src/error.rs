use fleur_domain::money::AmountError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Receipt reference is required")]
    MissingReceipt,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<AmountError> for CoreError {
    fn from(err: AmountError) -> Self {
        CoreError::InvalidAmount(err.to_string())
    }
}
