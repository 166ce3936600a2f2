use gateway::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("symbol '{0}' is not visible at the broker")]
    SymbolNotVisible(String),

    #[error("symbol '{0}' does not allow opening new positions")]
    SymbolNotTradeable(String),

    #[error("ATR value {0} is unusable for bracket sizing")]
    InvalidAtr(f64),

    #[error("gateway call failed: {0}")]
    Gateway(#[from] GatewayError),
}
