/// Effects module runs the work pickers defer until after a frame has been drawn.
/// Effects never touch stores directly; they dispatch new Actions with the results.
use crate::actions::{Action, PickerAction, PickerId};
use crate::dispatcher::Dispatcher;
use datepick_core::Deferred;
use std::time::Duration;
use tokio::task::{self, JoinHandle};

pub struct Effects {
    dispatcher: Dispatcher,
    timers: Vec<JoinHandle<()>>,
}

impl Effects {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            timers: Vec::new(),
        }
    }

    /// Run what a picker queued during the last action
    pub fn run_deferred(&mut self, id: PickerId, effects: Vec<Deferred>) {
        for effect in effects {
            match effect {
                Deferred::ExpireMessage { token, after } => self.schedule_expiry(id, token, after),
                Deferred::ScrollIntoView { dropdown, index } => {
                    self.dispatcher
                        .dispatch(Action::Picker(id, PickerAction::RevealOption(dropdown, index)));
                }
                Deferred::RestoreFocus => {
                    self.dispatcher.dispatch(Action::FocusPicker(id));
                }
            }
        }
    }

    /// Number of expiry timers that have not fired yet
    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|timer| !timer.is_finished()).count()
    }

    /// Abort every outstanding timer, used when the pickers are torn down
    pub fn cancel_all(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }

    fn schedule_expiry(&mut self, id: PickerId, token: u64, after: Duration) {
        self.timers.retain(|timer| !timer.is_finished());
        let dispatcher = self.dispatcher.clone();
        self.timers.push(task::spawn(async move {
            tokio::time::sleep(after).await;
            log::debug!("{:?} message {} expired", id, token);
            dispatcher.dispatch(Action::MessageExpired(id, token));
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepick_core::{CursorField, DropdownId, Side};

    #[tokio::test(start_paused = true)]
    async fn test_expiry_fires_after_timeout() {
        let (dispatcher, mut rx) = Dispatcher::new();
        let mut effects = Effects::new(dispatcher);
        effects.run_deferred(
            PickerId::Primary,
            vec![Deferred::ExpireMessage {
                token: 3,
                after: Duration::from_millis(3000),
            }],
        );
        assert!(rx.try_recv().is_none());
        assert_eq!(effects.pending_timers(), 1);

        match rx.recv().await {
            Some(Action::MessageExpired(PickerId::Primary, 3)) => {}
            other => panic!("expected MessageExpired, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scroll_and_focus_dispatch_immediately() {
        let (dispatcher, mut rx) = Dispatcher::new();
        let mut effects = Effects::new(dispatcher);
        let years = DropdownId::new(Side::End, CursorField::Year);
        effects.run_deferred(
            PickerId::Secondary,
            vec![
                Deferred::ScrollIntoView { dropdown: years, index: 12 },
                Deferred::RestoreFocus,
            ],
        );
        assert!(matches!(
            rx.try_recv(),
            Some(Action::Picker(PickerId::Secondary, PickerAction::RevealOption(_, 12)))
        ));
        assert!(matches!(rx.try_recv(), Some(Action::FocusPicker(PickerId::Secondary))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_stops_timers() {
        let (dispatcher, mut rx) = Dispatcher::new();
        let mut effects = Effects::new(dispatcher);
        effects.run_deferred(
            PickerId::Primary,
            vec![Deferred::ExpireMessage {
                token: 1,
                after: Duration::from_millis(10),
            }],
        );
        effects.cancel_all();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_none());
    }
}
