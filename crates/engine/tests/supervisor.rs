//! Supervisor lifecycle against the paper gateway.

use configuration::{Config, EngineSettings, InstrumentSettings, RiskSettings, StrategySettings};
use engine::{EngineError, Supervisor};
use events::{EngineEvent, EventBus, EventReceiver};
use gateway::SimulatedGateway;
use risk::AccountRiskGate;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn instrument(symbol: &str, enabled: bool) -> InstrumentSettings {
    InstrumentSettings {
        symbol: symbol.to_string(),
        timeframe: "M5".to_string(),
        lot: dec!(0.1),
        enabled,
    }
}

fn config(instruments: Vec<InstrumentSettings>, max_instruments: usize) -> Config {
    Config {
        engine: EngineSettings {
            // Tight loop so stop requests are picked up quickly.
            poll_interval_secs: 0,
            error_backoff_secs: 0,
            max_instruments,
            ..EngineSettings::default()
        },
        strategy: StrategySettings::default(),
        risk: RiskSettings::default(),
        instruments,
    }
}

async fn paper_gateway(symbols: &[&str]) -> Arc<SimulatedGateway> {
    let gw = SimulatedGateway::new(7);
    for symbol in symbols {
        gw.add_symbol(symbol, 1.1000, dec!(0.0001), 5).await;
    }
    Arc::new(gw)
}

fn supervisor(config: Config, gw: Arc<SimulatedGateway>) -> (Supervisor, EventReceiver) {
    let risk = Arc::new(AccountRiskGate::new(&config.risk).unwrap());
    let (bus, rx) = EventBus::channel();
    (Supervisor::new(config, gw, risk, bus), rx)
}

#[tokio::test]
async fn start_then_stop_runs_the_engine_to_completion() {
    let gw = paper_gateway(&["EURUSD"]).await;
    let inst = instrument("EURUSD", true);
    let (mut sup, mut rx) = supervisor(config(vec![inst.clone()], 8), gw);

    sup.start(&inst).await.unwrap();
    assert!(sup.is_running("EURUSD"));

    sup.stop("EURUSD").await.unwrap();
    assert!(!sup.is_running("EURUSD"));
    assert!(sup.running_symbols().is_empty());

    let mut saw_started = false;
    let mut saw_stopped = false;
    while let Ok(ev) = rx.try_recv() {
        match ev {
            EngineEvent::EngineStarted { ref symbol } if symbol == "EURUSD" => saw_started = true,
            EngineEvent::EngineStopped { ref symbol } if symbol == "EURUSD" => saw_stopped = true,
            _ => {}
        }
    }
    assert!(saw_started && saw_stopped);
}

#[tokio::test]
async fn a_second_start_for_the_same_symbol_is_refused() {
    let gw = paper_gateway(&["EURUSD"]).await;
    let inst = instrument("EURUSD", true);
    let (mut sup, _rx) = supervisor(config(vec![inst.clone()], 8), gw);

    sup.start(&inst).await.unwrap();
    let err = sup.start(&inst).await.unwrap_err();
    assert!(matches!(err, EngineError::AlreadyRunning(_)));
    sup.stop_all().await;
}

#[tokio::test]
async fn the_instrument_cap_is_enforced() {
    let gw = paper_gateway(&["EURUSD", "GBPUSD"]).await;
    let first = instrument("EURUSD", true);
    let second = instrument("GBPUSD", true);
    let (mut sup, _rx) = supervisor(config(vec![first.clone(), second.clone()], 1), gw);

    sup.start(&first).await.unwrap();
    let err = sup.start(&second).await.unwrap_err();
    assert!(matches!(err, EngineError::MaxInstruments { limit: 1 }));
    sup.stop_all().await;
}

#[tokio::test]
async fn an_unknown_symbol_fails_preflight() {
    let gw = paper_gateway(&[]).await;
    let inst = instrument("XAUUSD", true);
    let (mut sup, _rx) = supervisor(config(vec![inst.clone()], 8), gw);

    let err = sup.start(&inst).await.unwrap_err();
    assert!(matches!(err, EngineError::Gateway(_)));
    assert!(!sup.is_running("XAUUSD"));
}

#[tokio::test]
async fn a_disabled_instrument_is_refused() {
    let gw = paper_gateway(&["EURUSD"]).await;
    let inst = instrument("EURUSD", false);
    let (mut sup, _rx) = supervisor(config(vec![inst.clone()], 8), gw);

    let err = sup.start(&inst).await.unwrap_err();
    assert!(matches!(err, EngineError::InstrumentDisabled(_)));
}

#[tokio::test]
async fn start_enabled_skips_disabled_entries() {
    let gw = paper_gateway(&["EURUSD", "GBPUSD"]).await;
    let instruments = vec![instrument("EURUSD", true), instrument("GBPUSD", false)];
    let (mut sup, _rx) = supervisor(config(instruments, 8), gw);

    let started = sup.start_enabled().await.unwrap();
    assert_eq!(started, 1);
    assert!(sup.is_running("EURUSD"));
    assert!(!sup.is_running("GBPUSD"));
    sup.stop_all().await;
}
