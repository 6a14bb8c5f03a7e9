/// Post-commit side effects. The engine only records them; the host runs them after
/// rendering and can drop them all on unmount.
use crate::models::DropdownId;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Clear the transient message carrying `token` once `after` has elapsed
    ExpireMessage { token: u64, after: Duration },

    /// Bring the focused option of an open dropdown into view
    ScrollIntoView { dropdown: DropdownId, index: usize },

    /// Hand focus back to the picker's input once the popup has closed
    RestoreFocus,
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    pending: VecDeque<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Deferred) {
        // a newer scroll request for the same list supersedes the old one
        if let Deferred::ScrollIntoView { dropdown, .. } = effect {
            self.pending.retain(|pending| {
                !matches!(pending, Deferred::ScrollIntoView { dropdown: other, .. } if *other == dropdown)
            });
        }
        self.pending.push_back(effect);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<Deferred> {
        self.pending.drain(..).collect()
    }

    pub fn cancel_where(&mut self, predicate: impl Fn(&Deferred) -> bool) {
        self.pending.retain(|effect| !predicate(effect));
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Dropping {} deferred effects", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
