use crate::error::ConfigError;
use chrono::NaiveTime;
use core_types::Timeframe;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::str::FromStr;

/// The smallest bar window any analysis will accept, regardless of how
/// short the configured indicator lookbacks are.
pub const MIN_BAR_WINDOW: usize = 100;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
    #[serde(default)]
    pub risk: RiskSettings,
    /// The instruments to trade. Each enabled entry becomes one engine.
    #[serde(default)]
    pub instruments: Vec<InstrumentSettings>,
}

/// Scheduling and order-submission parameters shared by all engines.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Seconds to sleep between analysis cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Extended sleep after an unexpected cycle fault.
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
    /// How many bars to fetch per analysis cycle.
    #[serde(default = "default_bar_window")]
    pub bar_window: usize,
    /// Upper bound on concurrently running engines.
    #[serde(default = "default_max_instruments")]
    pub max_instruments: usize,
    /// Maximum tolerated price deviation on market orders, in points.
    #[serde(default = "default_deviation")]
    pub deviation_points: u32,
    /// Identifying comment attached to every submitted order.
    #[serde(default = "default_order_tag")]
    pub order_tag: String,
}

/// Technical-analysis parameters. The defaults reproduce the tuned values
/// the strategy was calibrated with; override them per deployment, not in
/// code.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategySettings {
    #[serde(default = "default_ema_fast")]
    pub ema_fast: usize,
    #[serde(default = "default_ema_medium")]
    pub ema_medium: usize,
    #[serde(default = "default_ema_slow")]
    pub ema_slow: usize,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,
    #[serde(default = "default_bb_period")]
    pub bb_period: usize,
    #[serde(default = "default_bb_deviation")]
    pub bb_deviation: f64,
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
    #[serde(default = "default_stoch_period")]
    pub stoch_period: usize,
    #[serde(default = "default_stoch_smooth")]
    pub stoch_k_smooth: usize,
    #[serde(default = "default_stoch_smooth")]
    pub stoch_d_smooth: usize,
    #[serde(default = "default_momentum_period")]
    pub momentum_period: usize,
    #[serde(default = "default_volume_ma_period")]
    pub volume_ma_period: usize,
    /// Current volume must exceed this multiple of its moving average.
    #[serde(default = "default_volume_ratio")]
    pub volume_ratio_threshold: f64,
    /// Minimum seconds between two completed analyses of one instrument.
    #[serde(default = "default_min_trade_spacing")]
    pub min_seconds_between_trades: u64,
    /// Start of the favorable trading window, "HH:MM".
    #[serde(default = "default_window_start")]
    pub trading_window_start: String,
    /// End of the favorable trading window, "HH:MM".
    #[serde(default = "default_window_end")]
    pub trading_window_end: String,
}

/// Account-level risk limits.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskSettings {
    /// Veto new trades when drawdown exceeds this percentage of balance.
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss_pct: Decimal,
    /// Take-profit distance as a multiple of the stop-loss distance.
    #[serde(default = "default_min_rr_ratio")]
    pub min_rr_ratio: f64,
    /// Veto new trades when this many positions are already open.
    #[serde(default = "default_max_positions")]
    pub max_open_positions: usize,
}

/// One tradable instrument as declared in the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentSettings {
    pub symbol: String,
    pub timeframe: String,
    pub lot: Decimal,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// The fully-resolved, immutable parameter set one engine instance runs
/// with. Assembled once at engine start; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub lot: Decimal,
    pub strategy: StrategySettings,
    pub risk: RiskSettings,
    pub window_start: NaiveTime,
    pub window_end: NaiveTime,
}

impl StrategyConfig {
    /// Whether `t` falls inside the favorable trading window. A window
    /// whose start is later than its end spans midnight.
    pub fn in_trading_window(&self, t: NaiveTime) -> bool {
        if self.window_start <= self.window_end {
            self.window_start <= t && t <= self.window_end
        } else {
            t >= self.window_start || t <= self.window_end
        }
    }
}

impl StrategySettings {
    /// The longest lookback any indicator needs. `Config::validate`
    /// refuses a bar window shorter than this.
    pub fn max_lookback(&self) -> usize {
        [
            self.ema_slow,
            self.macd_slow + self.macd_signal,
            self.rsi_period + 1,
            self.bb_period,
            self.stoch_period + self.stoch_k_smooth + self.stoch_d_smooth - 2,
            self.atr_period,
            self.momentum_period + 1,
            self.volume_ma_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl Config {
    /// Cross-field validation, run once at load time so engines can trust
    /// their parameters afterwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.strategy;
        for (name, v) in [
            ("ema_fast", s.ema_fast),
            ("ema_medium", s.ema_medium),
            ("ema_slow", s.ema_slow),
            ("macd_fast", s.macd_fast),
            ("macd_slow", s.macd_slow),
            ("macd_signal", s.macd_signal),
            ("rsi_period", s.rsi_period),
            ("bb_period", s.bb_period),
            ("atr_period", s.atr_period),
            ("stoch_period", s.stoch_period),
            ("stoch_k_smooth", s.stoch_k_smooth),
            ("stoch_d_smooth", s.stoch_d_smooth),
            ("momentum_period", s.momentum_period),
            ("volume_ma_period", s.volume_ma_period),
        ] {
            if v == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be > 0")));
            }
        }
        if s.rsi_oversold >= s.rsi_overbought {
            return Err(ConfigError::Invalid(
                "rsi_oversold must be below rsi_overbought".to_string(),
            ));
        }
        if s.bb_deviation < 0.0 {
            return Err(ConfigError::Invalid(
                "bb_deviation must be non-negative".to_string(),
            ));
        }
        if s.volume_ratio_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "volume_ratio_threshold must be positive".to_string(),
            ));
        }
        if self.risk.min_rr_ratio <= 0.0 {
            return Err(ConfigError::Invalid(
                "min_rr_ratio must be positive".to_string(),
            ));
        }
        if self.risk.max_daily_loss_pct <= dec!(0) {
            return Err(ConfigError::Invalid(
                "max_daily_loss_pct must be positive".to_string(),
            ));
        }
        if self.risk.max_open_positions == 0 {
            return Err(ConfigError::Invalid(
                "max_open_positions must be > 0".to_string(),
            ));
        }
        if self.engine.max_instruments == 0 {
            return Err(ConfigError::Invalid(
                "max_instruments must be > 0".to_string(),
            ));
        }
        let required_window = s.max_lookback().max(MIN_BAR_WINDOW);
        if self.engine.bar_window < required_window {
            return Err(ConfigError::Invalid(format!(
                "bar_window is {} but the configured indicators need at least {} bars",
                self.engine.bar_window, required_window
            )));
        }
        parse_window_time(&s.trading_window_start)?;
        parse_window_time(&s.trading_window_end)?;
        for inst in &self.instruments {
            if inst.lot <= dec!(0) {
                return Err(ConfigError::Invalid(format!(
                    "instrument '{}' has non-positive lot size",
                    inst.symbol
                )));
            }
            Timeframe::from_str(&inst.timeframe)
                .map_err(|e| ConfigError::Timeframe(inst.symbol.clone(), e))?;
        }
        Ok(())
    }

    /// Resolves one instrument entry into the immutable per-engine config.
    pub fn strategy_config(&self, inst: &InstrumentSettings) -> Result<StrategyConfig, ConfigError> {
        let timeframe = Timeframe::from_str(&inst.timeframe)
            .map_err(|e| ConfigError::Timeframe(inst.symbol.clone(), e))?;
        Ok(StrategyConfig {
            symbol: inst.symbol.clone(),
            timeframe,
            lot: inst.lot,
            strategy: self.strategy.clone(),
            risk: self.risk.clone(),
            window_start: parse_window_time(&self.strategy.trading_window_start)?,
            window_end: parse_window_time(&self.strategy.trading_window_end)?,
        })
    }
}

fn parse_window_time(s: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| ConfigError::InvalidWindowTime(s.to_string()))
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            error_backoff_secs: default_error_backoff(),
            bar_window: default_bar_window(),
            max_instruments: default_max_instruments(),
            deviation_points: default_deviation(),
            order_tag: default_order_tag(),
        }
    }
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            ema_fast: default_ema_fast(),
            ema_medium: default_ema_medium(),
            ema_slow: default_ema_slow(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            rsi_period: default_rsi_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            bb_period: default_bb_period(),
            bb_deviation: default_bb_deviation(),
            atr_period: default_atr_period(),
            stoch_period: default_stoch_period(),
            stoch_k_smooth: default_stoch_smooth(),
            stoch_d_smooth: default_stoch_smooth(),
            momentum_period: default_momentum_period(),
            volume_ma_period: default_volume_ma_period(),
            volume_ratio_threshold: default_volume_ratio(),
            min_seconds_between_trades: default_min_trade_spacing(),
            trading_window_start: default_window_start(),
            trading_window_end: default_window_end(),
        }
    }
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_daily_loss_pct: default_max_daily_loss(),
            min_rr_ratio: default_min_rr_ratio(),
            max_open_positions: default_max_positions(),
        }
    }
}

fn default_poll_interval() -> u64 {
    5
}
fn default_error_backoff() -> u64 {
    10
}
fn default_bar_window() -> usize {
    200
}
fn default_max_instruments() -> usize {
    8
}
fn default_deviation() -> u32 {
    10
}
fn default_order_tag() -> String {
    "kestrel-v1".to_string()
}
fn default_ema_fast() -> usize {
    9
}
fn default_ema_medium() -> usize {
    21
}
fn default_ema_slow() -> usize {
    50
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}
fn default_rsi_period() -> usize {
    14
}
fn default_rsi_overbought() -> f64 {
    70.0
}
fn default_rsi_oversold() -> f64 {
    30.0
}
fn default_bb_period() -> usize {
    20
}
fn default_bb_deviation() -> f64 {
    1.8
}
fn default_atr_period() -> usize {
    10
}
fn default_stoch_period() -> usize {
    9
}
fn default_stoch_smooth() -> usize {
    3
}
fn default_momentum_period() -> usize {
    10
}
fn default_volume_ma_period() -> usize {
    20
}
fn default_volume_ratio() -> f64 {
    1.2
}
fn default_min_trade_spacing() -> u64 {
    60
}
fn default_window_start() -> String {
    "09:30".to_string()
}
fn default_window_end() -> String {
    "16:30".to_string()
}
fn default_max_daily_loss() -> Decimal {
    dec!(3.0)
}
fn default_min_rr_ratio() -> f64 {
    1.2
}
fn default_max_positions() -> usize {
    3
}
fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            engine: EngineSettings::default(),
            strategy: StrategySettings::default(),
            risk: RiskSettings::default(),
            instruments: vec![InstrumentSettings {
                symbol: "EURUSD".to_string(),
                timeframe: "M5".to_string(),
                lot: dec!(0.1),
                enabled: true,
            }],
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn bad_timeframe_is_rejected_at_load_not_runtime() {
        let mut cfg = base_config();
        cfg.instruments[0].timeframe = "M7".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Timeframe(_, _))
        ));
    }

    #[test]
    fn inverted_rsi_thresholds_are_rejected() {
        let mut cfg = base_config();
        cfg.strategy.rsi_oversold = 80.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn strategy_config_resolves_window_times() {
        let cfg = base_config();
        let sc = cfg.strategy_config(&cfg.instruments[0]).unwrap();
        assert_eq!(sc.window_start, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(sc.window_end, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
        assert_eq!(sc.timeframe, Timeframe::M5);
    }

    #[test]
    fn trading_window_contains_and_excludes() {
        let cfg = base_config();
        let sc = cfg.strategy_config(&cfg.instruments[0]).unwrap();
        assert!(sc.in_trading_window(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(sc.in_trading_window(NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert!(!sc.in_trading_window(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(!sc.in_trading_window(NaiveTime::from_hms_opt(20, 0, 0).unwrap()));
    }

    #[test]
    fn overnight_window_spans_midnight() {
        let mut cfg = base_config();
        cfg.strategy.trading_window_start = "22:00".to_string();
        cfg.strategy.trading_window_end = "04:00".to_string();
        let sc = cfg.strategy_config(&cfg.instruments[0]).unwrap();
        assert!(sc.in_trading_window(NaiveTime::from_hms_opt(23, 0, 0).unwrap()));
        assert!(sc.in_trading_window(NaiveTime::from_hms_opt(2, 0, 0).unwrap()));
        assert!(!sc.in_trading_window(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn max_lookback_covers_the_slow_ema() {
        assert!(StrategySettings::default().max_lookback() >= 50);
    }

    #[test]
    fn undersized_bar_window_is_rejected() {
        let mut cfg = base_config();
        cfg.engine.bar_window = 60;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn bar_window_must_cover_the_longest_lookback() {
        // A 150-bar EMA pushes the requirement past the default window.
        let mut cfg = base_config();
        cfg.strategy.ema_slow = 150;
        cfg.engine.bar_window = 120;
        assert!(cfg.validate().is_err());

        cfg.engine.bar_window = 150;
        assert!(cfg.validate().is_ok());
    }
}
