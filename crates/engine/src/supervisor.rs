//! Lifecycle management for the per-instrument engines.

use crate::engine::{EngineState, StrategyEngine};
use crate::error::EngineError;
use configuration::{Config, InstrumentSettings};
use events::EventBus;
use gateway::TradeGateway;
use risk::RiskManager;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

struct EngineHandle {
    state: Arc<Mutex<EngineState>>,
    task: JoinHandle<()>,
}

/// Owns every running engine, keyed by symbol.
///
/// All starts and stops go through here, so the instrument cap and the
/// one-engine-per-symbol rule are enforced in a single place and no
/// engine can be orphaned.
pub struct Supervisor {
    config: Config,
    gateway: Arc<dyn TradeGateway>,
    risk: Arc<dyn RiskManager>,
    events: EventBus,
    engines: HashMap<String, EngineHandle>,
}

impl Supervisor {
    pub fn new(
        config: Config,
        gateway: Arc<dyn TradeGateway>,
        risk: Arc<dyn RiskManager>,
        events: EventBus,
    ) -> Self {
        Self {
            config,
            gateway,
            risk,
            events,
            engines: HashMap::new(),
        }
    }

    /// Starts one engine after checking the symbol is actually tradable.
    pub async fn start(&mut self, inst: &InstrumentSettings) -> Result<(), EngineError> {
        if !inst.enabled {
            return Err(EngineError::InstrumentDisabled(inst.symbol.clone()));
        }
        if self.engines.contains_key(&inst.symbol) {
            return Err(EngineError::AlreadyRunning(inst.symbol.clone()));
        }
        let limit = self.config.engine.max_instruments;
        if self.engines.len() >= limit {
            return Err(EngineError::MaxInstruments { limit });
        }

        let info = self.gateway.symbol_info(&inst.symbol).await?;
        if !info.visible {
            return Err(EngineError::SymbolUnavailable {
                symbol: inst.symbol.clone(),
                reason: "not visible at the broker".to_string(),
            });
        }
        if !info.trade_mode.allows_opening() {
            return Err(EngineError::SymbolUnavailable {
                symbol: inst.symbol.clone(),
                reason: "trade mode forbids opening positions".to_string(),
            });
        }

        let strategy_config = self.config.strategy_config(inst)?;
        let engine = StrategyEngine::new(
            strategy_config,
            self.config.engine.clone(),
            self.gateway.clone(),
            self.risk.clone(),
            self.events.clone(),
        );
        let state = engine.state();
        let task = tokio::spawn(engine.run());
        self.engines
            .insert(inst.symbol.clone(), EngineHandle { state, task });
        info!(symbol = %inst.symbol, "engine registered");
        Ok(())
    }

    /// Starts every enabled instrument in the configuration. Stops at the
    /// first failure, leaving already-started engines running.
    pub async fn start_enabled(&mut self) -> Result<usize, EngineError> {
        let instruments: Vec<_> = self
            .config
            .instruments
            .iter()
            .filter(|i| i.enabled)
            .cloned()
            .collect();
        let mut started = 0;
        for inst in &instruments {
            self.start(inst).await?;
            started += 1;
        }
        Ok(started)
    }

    /// Requests a stop and waits for the engine to finish its current
    /// cycle and exit.
    pub async fn stop(&mut self, symbol: &str) -> Result<(), EngineError> {
        let handle = self
            .engines
            .remove(symbol)
            .ok_or_else(|| EngineError::NotRunning(symbol.to_string()))?;
        handle.state.lock().await.running = false;
        let _ = handle.task.await;
        info!(%symbol, "engine deregistered");
        Ok(())
    }

    /// Stops every running engine, in no particular order.
    pub async fn stop_all(&mut self) {
        let symbols: Vec<String> = self.engines.keys().cloned().collect();
        for symbol in symbols {
            let _ = self.stop(&symbol).await;
        }
    }

    pub fn is_running(&self, symbol: &str) -> bool {
        self.engines.contains_key(symbol)
    }

    pub fn running_symbols(&self) -> Vec<String> {
        self.engines.keys().cloned().collect()
    }
}
