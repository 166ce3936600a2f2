use crate::messages::EngineEvent;
use tokio::sync::mpsc;

/// Receiving half of the event channel, held by the front end.
pub type EventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

/// Fire-and-forget publisher handed to every engine.
///
/// Publishing must never block an analysis cycle and must never surface an
/// error into the caller: if the receiving side is gone, events are simply
/// dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<EngineEvent>,
}

impl EventBus {
    /// Creates a connected bus and its receiver.
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Publishes an event. Infallible by contract: a closed channel means
    /// nobody is listening, which is not the engine's problem.
    pub fn publish(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn published_events_arrive_in_order() {
        let (bus, mut rx) = EventBus::channel();
        bus.publish(EngineEvent::EngineStarted {
            symbol: "EURUSD".to_string(),
        });
        bus.publish(EngineEvent::AnalysisStarted {
            symbol: "EURUSD".to_string(),
        });

        assert!(matches!(
            rx.recv().await,
            Some(EngineEvent::EngineStarted { .. })
        ));
        assert!(matches!(
            rx.recv().await,
            Some(EngineEvent::AnalysisStarted { .. })
        ));
    }

    #[test]
    fn publish_to_a_dropped_receiver_does_not_panic() {
        let (bus, rx) = EventBus::channel();
        drop(rx);
        bus.publish(EngineEvent::EngineStopped {
            symbol: "EURUSD".to_string(),
        });
    }
}
