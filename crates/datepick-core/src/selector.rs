/// Keyboard-navigable list picker for one cursor's year or month
use crate::config::PickerConfig;
use crate::deferred::{Deferred, DeferredQueue};
use crate::models::{CursorField, DropdownId};
use crate::store::DateCursorStore;

/// Keys a selector reacts to. Hosts translate their own key events into these
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Space,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// Focus moved to this option index
    Moved(usize),
    /// This value was written to the cursor and the list closed
    Committed(i32),
    /// The list closed without a change
    Closed,
    /// The list was not open
    Ignored,
}

#[derive(Debug, Clone)]
pub struct YearMonthSelector {
    id: DropdownId,
    options: Vec<i32>,
    focused: usize,
}

impl YearMonthSelector {
    pub fn new(id: DropdownId, config: &PickerConfig) -> Self {
        let options = match id.field {
            CursorField::Year => (config.min_year..=config.max_year).collect(),
            CursorField::Month => (1..=12).collect(),
        };
        Self {
            id,
            options,
            focused: 0,
        }
    }

    pub fn id(&self) -> DropdownId {
        self.id
    }

    pub fn options(&self) -> &[i32] {
        &self.options
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn is_open(&self, store: &DateCursorStore) -> bool {
        store.state().open_dropdown == Some(self.id)
    }

    /// The value this selector currently reflects on its cursor
    pub fn current_value(&self, store: &DateCursorStore) -> i32 {
        let cursor = store.state().cursor(self.id.side);
        match self.id.field {
            CursorField::Year => cursor.year,
            CursorField::Month => cursor.month as i32,
        }
    }

    /// Open this list (closing any other) with focus on the cursor's current value
    pub fn open(&mut self, store: &mut DateCursorStore, deferred: &mut DeferredQueue) {
        store.set_dropdown(self.id.side, self.id.field, true);
        self.focused = self.index_nearest(self.current_value(store));
        deferred.push(Deferred::ScrollIntoView {
            dropdown: self.id,
            index: self.focused,
        });
    }

    pub fn close(&mut self, store: &mut DateCursorStore) {
        store.set_dropdown(self.id.side, self.id.field, false);
    }

    pub fn toggle(&mut self, store: &mut DateCursorStore, deferred: &mut DeferredQueue) {
        if self.is_open(store) {
            self.close(store);
        } else {
            self.open(store, deferred);
        }
    }

    pub fn handle_key(
        &mut self,
        key: SelectorKey,
        store: &mut DateCursorStore,
        deferred: &mut DeferredQueue,
    ) -> SelectorOutcome {
        if !self.is_open(store) || self.options.is_empty() {
            return SelectorOutcome::Ignored;
        }
        let last = self.options.len() - 1;
        let target = match key {
            SelectorKey::ArrowDown => {
                if self.focused >= last {
                    0
                } else {
                    self.focused + 1
                }
            }
            SelectorKey::ArrowUp => {
                if self.focused == 0 {
                    last
                } else {
                    self.focused - 1
                }
            }
            SelectorKey::Home => 0,
            SelectorKey::End => last,
            SelectorKey::Enter | SelectorKey::Space => {
                return self.choose(self.focused, store);
            }
            SelectorKey::Escape => {
                self.close(store);
                return SelectorOutcome::Closed;
            }
        };
        self.focused = target;
        deferred.push(Deferred::ScrollIntoView {
            dropdown: self.id,
            index: target,
        });
        SelectorOutcome::Moved(target)
    }

    /// Commit the option at `index` (a click, or Enter on the focused option)
    pub fn choose(&mut self, index: usize, store: &mut DateCursorStore) -> SelectorOutcome {
        let Some(value) = self.options.get(index).copied() else {
            return SelectorOutcome::Ignored;
        };
        self.focused = index;
        store.set_cursor(self.id.side, self.id.field, value);
        self.close(store);
        SelectorOutcome::Committed(value)
    }

    fn index_nearest(&self, value: i32) -> usize {
        let first = self.options.first().copied().unwrap_or_default();
        let offset = (value - first).max(0) as usize;
        offset.min(self.options.len().saturating_sub(1))
    }
}
