use configuration::ConfigError;
use executor::ExecutorError;
use gateway::GatewayError;
use risk::RiskError;
use signals::SignalError;
use thiserror::Error;

/// Supervisor-level failures: an engine could not be started or stopped.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("an engine for '{0}' is already running")]
    AlreadyRunning(String),

    #[error("no engine is running for '{0}'")]
    NotRunning(String),

    #[error("instrument '{0}' is disabled in the configuration")]
    InstrumentDisabled(String),

    #[error("instrument limit of {limit} engines reached")]
    MaxInstruments { limit: usize },

    #[error("symbol '{symbol}' is unavailable: {reason}")]
    SymbolUnavailable { symbol: String, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("gateway call failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Why a single analysis cycle aborted.
///
/// The distinction that matters to the loop is [`CycleError::is_fault`]:
/// expected aborts (thin data, warming indicators, a broker "no") resume
/// at the normal poll interval, while faults trigger the longer backoff.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("bar window has {actual} bars, need {required}")]
    DataUnavailable { required: usize, actual: usize },

    #[error("indicator state is unusable: {0}")]
    InvalidIndicatorState(String),

    #[error("broker rejected the order: {0}")]
    OrderRejected(String),

    #[error("gateway call failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("order submission failed: {0}")]
    Execution(String),

    #[error("risk assessment failed: {0}")]
    Risk(#[from] RiskError),
}

impl CycleError {
    /// True for unexpected failures that warrant the extended backoff.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            CycleError::Gateway(_) | CycleError::Execution(_) | CycleError::Risk(_)
        )
    }
}

impl From<SignalError> for CycleError {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::InsufficientBars { required, actual } => {
                CycleError::DataUnavailable { required, actual }
            }
            SignalError::InvalidIndicatorState(what) => CycleError::InvalidIndicatorState(what),
            SignalError::Indicator(e) => CycleError::InvalidIndicatorState(e.to_string()),
        }
    }
}

impl From<ExecutorError> for CycleError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::InvalidAtr(v) => CycleError::InvalidIndicatorState(format!("atr {v}")),
            ExecutorError::Gateway(e) => CycleError::Gateway(e),
            other => CycleError::Execution(other.to_string()),
        }
    }
}
