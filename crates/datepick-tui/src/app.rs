/// Main application struct and event loop
use crate::actions::{Action, PickerId};
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::effects::Effects;
use crate::keyboard;
use crate::logger::LogBuffer;
use crate::stores::{PickerStore, UIStore, ui_store::demo_validators};
use crate::ui::render_layout;
use datepick_core::{Clock, Deferred, PickerConfig, PickerValue, SystemClock};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::collections::BTreeMap;
use std::time::Duration;

pub struct App {
    dispatcher: Dispatcher,

    ui_store: UIStore,

    /// One store per picker instance on the page
    pickers: Vec<PickerStore>,

    log_buffer: LogBuffer,

    effects: Effects,

    /// Deferred work collected while reducing, run once the next frame is drawn
    pending: Vec<(PickerId, Vec<Deferred>)>,
}

impl App {
    pub fn new(
        config: PickerConfig,
        dual: bool,
        log_buffer: LogBuffer,
    ) -> color_eyre::Result<(Self, ActionReceiver)> {
        let (dispatcher, action_receiver) = Dispatcher::new();

        let ids = if dual {
            vec![PickerId::Primary, PickerId::Secondary]
        } else {
            vec![PickerId::Primary]
        };
        let pickers = ids
            .iter()
            .map(|id| PickerStore::new(*id, config.clone(), dispatcher.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let validators = demo_validators(SystemClock.today(), config.separator.clone());
        let ui_store = UIStore::new(ids, validators);
        let effects = Effects::new(dispatcher.clone());

        Ok((
            Self {
                dispatcher,
                ui_store,
                pickers,
                log_buffer,
                effects,
                pending: Vec::new(),
            },
            action_receiver,
        ))
    }

    /// Runs until the user quits, returning the last committed value of each picker
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> color_eyre::Result<BTreeMap<PickerId, PickerValue>> {
        log::info!("datepick started with {} picker(s)", self.pickers.len());

        loop {
            terminal.draw(|frame| {
                render_layout(frame, &self.ui_store, &self.pickers, &self.log_buffer);
            })?;

            for (id, effects) in self.pending.drain(..) {
                self.effects.run_deferred(id, effects);
            }

            if self.ui_store.should_exit() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key_event) = event::read()? {
                            if key_event.kind == KeyEventKind::Press {
                                if let Some(action) = keyboard::handle_key_event(
                                    key_event,
                                    &self.ui_store,
                                    &self.pickers,
                                ) {
                                    self.dispatcher.dispatch(action);
                                }
                            }
                        }
                    }
                }

                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        self.shutdown();
        Ok(self.ui_store.get_state().committed)
    }

    fn handle_action(&mut self, action: &Action) {
        log::debug!("Handling action: {:?}", action);

        self.ui_store.reduce(action);
        for picker in &self.pickers {
            picker.reduce(action);
            let deferred = picker.take_deferred();
            if !deferred.is_empty() {
                self.pending.push((picker.id(), deferred));
            }
        }
    }

    fn shutdown(&mut self) {
        self.effects.cancel_all();
        self.pending.clear();
        for picker in &self.pickers {
            picker.unmount();
        }
        log::info!("datepick stopped");
    }
}
