use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("input series has {actual} samples but the indicator needs at least {required}")]
    InsufficientData { required: usize, actual: usize },

    #[error("indicator period must be greater than zero")]
    ZeroPeriod,
}

/// Shared length guard used by every indicator entry point.
pub(crate) fn require_len(actual: usize, required: usize) -> Result<(), IndicatorError> {
    if actual < required {
        Err(IndicatorError::InsufficientData { required, actual })
    } else {
        Ok(())
    }
}

/// Shared period guard used by every indicator entry point.
pub(crate) fn require_period(period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        Err(IndicatorError::ZeroPeriod)
    } else {
        Ok(())
    }
}
