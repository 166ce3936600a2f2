//! # Kestrel Indicator Library
//!
//! Pure numeric transforms of OHLCV series into derived series. Every
//! function takes plain `&[f64]` slices and returns vectors aligned to the
//! input (front-padded where a full rolling window is not yet available),
//! so callers can always reason about "the last two points".
//!
//! ## Architectural Principles
//!
//! - **Layer 0 math:** no knowledge of bars, symbols, or configuration.
//!   Higher layers convert `Decimal` prices to `f64` at this seam.
//! - **Fail fast:** each function returns `IndicatorError::InsufficientData`
//!   when the input is shorter than its minimum window, instead of
//!   producing a silently-wrong series.
//! - **NaN warmup:** where a rolling window is not yet full the output is
//!   `f64::NAN` (RSI and Momentum use their own documented fills). Callers
//!   must check the points they actually read.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod error;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod stochastic;
mod window;

pub use atr::atr;
pub use bollinger::bollinger;
pub use ema::ema;
pub use error::IndicatorError;
pub use macd::macd;
pub use momentum::momentum;
pub use rsi::rsi;
pub use stochastic::stochastic;
