use thiserror::Error;

/// Rejections raised by the calorie balance calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl BalanceError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
