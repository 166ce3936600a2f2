use indicators::IndicatorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("bar window has {actual} bars; analysis needs at least {required}")]
    InsufficientBars { required: usize, actual: usize },

    #[error("indicator produced a non-finite value at a decision point: {0}")]
    InvalidIndicatorState(String),

    #[error("indicator calculation failed: {0}")]
    Indicator(#[from] IndicatorError),
}
