//! One instrument's supervised analysis loop.

use crate::error::CycleError;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use configuration::{EngineSettings, StrategyConfig};
use core_types::{Direction, RiskContext};
use events::{EngineEvent, EventBus};
use executor::{BracketPrices, OrderPlacer};
use gateway::TradeGateway;
use risk::{RiskManager, RiskVerdict, RiskVeto};
use signals::{IndicatorSnapshot, fuse, trend_hint};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The mutable book-keeping one engine carries between cycles.
///
/// Shared with the supervisor behind a mutex; the engine holds the lock
/// for the whole of each cycle, so a stop request takes effect at the
/// next cycle boundary and never interrupts one mid-flight.
#[derive(Debug)]
pub struct EngineState {
    pub running: bool,
    pub last_analysis: Option<DateTime<Utc>>,
    pub last_ticket: Option<u64>,
}

/// What a completed (non-erroring) cycle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Too soon since the last completed analysis; nothing was fetched.
    Throttled,
    /// Analysis ran and the vote did not clear the threshold.
    NoSignal,
    /// A signal fired but the risk gate refused the entry.
    RiskVetoed(RiskVeto),
    /// A bracket order was accepted by the broker.
    OrderPlaced {
        ticket: u64,
        direction: Direction,
        bracket: BracketPrices,
    },
}

/// The per-instrument strategy engine: fetch, analyze, gate, submit.
pub struct StrategyEngine {
    config: StrategyConfig,
    settings: EngineSettings,
    gateway: Arc<dyn TradeGateway>,
    risk: Arc<dyn RiskManager>,
    placer: OrderPlacer,
    events: EventBus,
    state: Arc<Mutex<EngineState>>,
}

impl StrategyEngine {
    pub fn new(
        config: StrategyConfig,
        settings: EngineSettings,
        gateway: Arc<dyn TradeGateway>,
        risk: Arc<dyn RiskManager>,
        events: EventBus,
    ) -> Self {
        let placer = OrderPlacer::new(
            gateway.clone(),
            settings.deviation_points,
            settings.order_tag.clone(),
        );
        Self {
            config,
            settings,
            gateway,
            risk,
            placer,
            events,
            state: Arc::new(Mutex::new(EngineState {
                running: true,
                last_analysis: None,
                last_ticket: None,
            })),
        }
    }

    /// The shared state handle the supervisor keeps for stop requests and
    /// inspection.
    pub fn state(&self) -> Arc<Mutex<EngineState>> {
        self.state.clone()
    }

    /// Runs the polling loop until the shared `running` flag is cleared.
    pub async fn run(self) {
        let symbol = self.config.symbol.clone();
        info!(%symbol, timeframe = %self.config.timeframe, "engine starting");
        self.events.publish(EngineEvent::EngineStarted {
            symbol: symbol.clone(),
        });

        loop {
            let sleep_secs = {
                let mut state = self.state.lock().await;
                if !state.running {
                    break;
                }
                match self.cycle(&mut state).await {
                    Ok(outcome) => {
                        self.log_outcome(&outcome);
                        self.settings.poll_interval_secs
                    }
                    Err(err) if err.is_fault() => {
                        warn!(%symbol, error = %err, "cycle fault, backing off");
                        self.events.publish(EngineEvent::CycleFailed {
                            symbol: symbol.clone(),
                            error: err.to_string(),
                        });
                        self.settings.error_backoff_secs
                    }
                    Err(err) => {
                        debug!(%symbol, reason = %err, "cycle aborted");
                        self.settings.poll_interval_secs
                    }
                }
            };
            tokio::time::sleep(Duration::from_secs(sleep_secs)).await;
        }

        info!(%symbol, "engine stopped");
        self.events.publish(EngineEvent::EngineStopped { symbol });
    }

    /// Runs exactly one cycle, for callers that drive the engine manually.
    pub async fn run_once(&self) -> Result<CycleOutcome, CycleError> {
        let mut state = self.state.lock().await;
        self.cycle(&mut state).await
    }

    async fn cycle(&self, state: &mut EngineState) -> Result<CycleOutcome, CycleError> {
        let now = Utc::now();
        let symbol = &self.config.symbol;

        if let Some(last) = state.last_analysis {
            let spacing =
                ChronoDuration::seconds(self.config.strategy.min_seconds_between_trades as i64);
            if now - last < spacing {
                return Ok(CycleOutcome::Throttled);
            }
        }

        self.events.publish(EngineEvent::AnalysisStarted {
            symbol: symbol.clone(),
        });
        let bars = self
            .gateway
            .fetch_bars(symbol, self.config.timeframe, self.settings.bar_window)
            .await?;
        let snapshot = IndicatorSnapshot::compute(&bars, &self.config)?;
        state.last_analysis = Some(now);

        if let Some(direction) = trend_hint(&snapshot) {
            self.events.publish(EngineEvent::TrendDetected {
                symbol: symbol.clone(),
                direction,
            });
        }

        let Some(signal) = fuse(&snapshot, now.time(), now, &self.config) else {
            return Ok(CycleOutcome::NoSignal);
        };
        self.events.publish(EngineEvent::SignalConfirmed {
            symbol: symbol.clone(),
            direction: signal.direction,
            conditions_met: signal.conditions_met,
        });

        let ctx = RiskContext {
            open_positions: self.gateway.open_position_count().await?,
            account: self.gateway.account().await?,
        };
        if let RiskVerdict::Vetoed(veto) = self.risk.assess(&ctx)? {
            warn!(%symbol, %veto, "signal vetoed by the risk gate");
            self.events.publish(EngineEvent::RiskVetoed {
                symbol: symbol.clone(),
                reason: veto.to_string(),
            });
            return Ok(CycleOutcome::RiskVetoed(veto));
        }

        let (result, bracket) = self.placer.place(&self.config, &signal, snapshot.atr).await?;
        match result.ticket.filter(|_| result.accepted) {
            Some(ticket) => {
                state.last_ticket = Some(ticket);
                self.events.publish(EngineEvent::OrderPlaced {
                    symbol: symbol.clone(),
                    direction: signal.direction,
                    ticket,
                    price: bracket.entry,
                    stop_loss: bracket.stop_loss,
                    take_profit: bracket.take_profit,
                });
                Ok(CycleOutcome::OrderPlaced {
                    ticket,
                    direction: signal.direction,
                    bracket,
                })
            }
            None => {
                let reason = result
                    .reason
                    .unwrap_or_else(|| "no reason given".to_string());
                self.events.publish(EngineEvent::OrderRejected {
                    symbol: symbol.clone(),
                    reason: reason.clone(),
                });
                Err(CycleError::OrderRejected(reason))
            }
        }
    }

    fn log_outcome(&self, outcome: &CycleOutcome) {
        let symbol = &self.config.symbol;
        match outcome {
            CycleOutcome::Throttled => {}
            CycleOutcome::NoSignal => debug!(%symbol, "no signal this cycle"),
            CycleOutcome::RiskVetoed(veto) => info!(%symbol, %veto, "entry vetoed"),
            CycleOutcome::OrderPlaced {
                ticket,
                direction,
                bracket,
            } => info!(
                %symbol,
                ticket,
                ?direction,
                entry = %bracket.entry,
                stop_loss = %bracket.stop_loss,
                take_profit = %bracket.take_profit,
                "bracket order placed"
            ),
        }
    }
}
