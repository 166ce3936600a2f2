//! # Kestrel Risk Management
//!
//! The final gate between a confirmed signal and the order pipeline.
//!
//! ## Architectural Principles
//!
//! - **Verdicts, not exceptions:** a veto is a normal, inspectable
//!   outcome. Errors are reserved for unusable inputs (bad parameters, a
//!   corrupt account snapshot).
//! - **Trait seam:** the engine holds a `dyn RiskManager`, so the gate can
//!   be swapped or stubbed in tests without touching the cycle logic.

pub mod account_gate;
pub mod error;

pub use account_gate::AccountRiskGate;
pub use error::RiskError;

use core_types::RiskContext;
use rust_decimal::Decimal;
use std::fmt;

/// Why an entry was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskVeto {
    MaxPositions { open: usize, limit: usize },
    Drawdown { drawdown_pct: Decimal, limit: Decimal },
}

impl fmt::Display for RiskVeto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxPositions { open, limit } => {
                write!(f, "{open} positions open, limit is {limit}")
            }
            Self::Drawdown { drawdown_pct, limit } => {
                write!(f, "drawdown {drawdown_pct}% exceeds the {limit}% daily limit")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskVerdict {
    Approved,
    Vetoed(RiskVeto),
}

/// The contract for any pre-trade risk assessment.
pub trait RiskManager: Send + Sync {
    /// Judges whether the account may open one more position right now.
    fn assess(&self, ctx: &RiskContext) -> Result<RiskVerdict, RiskError>;
}
