//! A pre-trade gate over account health.
//!
//! Applied after signal fusion and before order construction. It never
//! sizes positions; it only answers "may this account open one more?".

use crate::error::RiskError;
use crate::{RiskManager, RiskVerdict, RiskVeto};
use configuration::RiskSettings;
use core_types::RiskContext;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Vetoes entries when the account already carries too many positions or
/// has drawn down past the daily loss limit.
#[derive(Debug, Clone)]
pub struct AccountRiskGate {
    max_open_positions: usize,
    max_daily_loss_pct: Decimal,
}

impl AccountRiskGate {
    pub fn new(settings: &RiskSettings) -> Result<Self, RiskError> {
        if settings.max_open_positions == 0 {
            return Err(RiskError::InvalidParameters(
                "max_open_positions must be at least 1".to_string(),
            ));
        }
        if settings.max_daily_loss_pct <= Decimal::ZERO {
            return Err(RiskError::InvalidParameters(
                "max_daily_loss_pct must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_open_positions: settings.max_open_positions,
            max_daily_loss_pct: settings.max_daily_loss_pct,
        })
    }
}

impl RiskManager for AccountRiskGate {
    fn assess(&self, ctx: &RiskContext) -> Result<RiskVerdict, RiskError> {
        if ctx.open_positions >= self.max_open_positions {
            return Ok(RiskVerdict::Vetoed(RiskVeto::MaxPositions {
                open: ctx.open_positions,
                limit: self.max_open_positions,
            }));
        }

        let balance = ctx.account.balance;
        if balance <= Decimal::ZERO {
            return Err(RiskError::InvalidAccountState(format!(
                "non-positive balance: {balance}"
            )));
        }

        // Percentage drop of equity below balance. Negative when the
        // account is in open profit.
        let drawdown_pct = (balance - ctx.account.equity) / balance * dec!(100);
        if drawdown_pct > self.max_daily_loss_pct {
            return Ok(RiskVerdict::Vetoed(RiskVeto::Drawdown {
                drawdown_pct,
                limit: self.max_daily_loss_pct,
            }));
        }

        Ok(RiskVerdict::Approved)
    }
}
