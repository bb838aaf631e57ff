use thiserror::Error;
use uuid::Uuid;

use crate::core::types::Money;

#[derive(Error, Debug)]
pub enum BarnError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient funds: balance {balance} cannot cover {amount}")]
    InsufficientFunds { balance: Money, amount: Money },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transient store error: {0}")]
    TransientStore(String),

    #[error("Unexpected error [{correlation_id}]: {message}")]
    Unexpected { correlation_id: Uuid, message: String },
}

pub type Result<T> = std::result::Result<T, BarnError>;

impl BarnError {
    /// Wrap an error that no caller can act on. The correlation id ties the
    /// propagated error to the log line emitted here.
    pub fn unexpected(message: impl Into<String>) -> Self {
        let correlation_id = Uuid::new_v4();
        let message = message.into();
        log::error!("unexpected error [{correlation_id}]: {message}");
        Self::Unexpected {
            correlation_id,
            message,
        }
    }

    /// True for errors worth retrying on a later tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientStore(_))
    }
}
