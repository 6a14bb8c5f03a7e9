/// Single queue every picker action goes through. Keys, listeners and timers all
/// dispatch here and the event loop hands each action to every store in order.
use crate::actions::Action;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    /// A dispatcher and the receiving end the event loop drains
    pub fn new() -> (Self, ActionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, ActionReceiver { rx })
    }

    /// Dispatch an action through the system.
    /// Safe to call from inside a reducer: the action is only queued.
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("Failed to dispatch action {:?}", e.0);
        }
    }
}

/// ActionReceiver hands queued actions to the event loop
pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    /// Receive the next action (waiting until one is available)
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Take an already queued action without waiting
    #[cfg(test)]
    pub fn try_recv(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}
