/// Core Action types for the flux architecture.
/// All state mutations flow through Actions dispatched to the Dispatcher.
use datepick_core::{DropdownId, PickerValue, SelectorKey, Side};

/// Represents all possible user intents and system events in the application
#[derive(Debug, Clone)]
pub enum Action {
    // ===== UI Actions (user-initiated) =====
    /// User moved keyboard focus to another picker
    FocusPicker(PickerId),

    /// User toggled the help overlay
    ToggleHelp,

    /// An interaction aimed at one picker instance
    Picker(PickerId, PickerAction),

    // ===== System/Effect Actions (emitted by Effects) =====
    /// A transient picker message reached its display timeout
    MessageExpired(PickerId, u64),

    /// A picker fired its change listeners (accept or clear)
    ValueCommitted(PickerId, PickerValue),

    /// Application should exit
    Quit,
}

/// Interactions with a single picker
#[derive(Debug, Clone)]
pub enum PickerAction {
    Open,
    Accept,
    Cancel,
    Clear,

    /// Move keyboard focus to the start or end calendar
    FocusSide(Side),

    /// Move the focused day by this many days, crossing months when needed
    MoveFocus(i64),

    /// Select the focused day of the focused calendar
    SelectFocused,

    StepMonth(Side, i32),
    ToggleDropdown(DropdownId),
    SelectorKey(SelectorKey),
    Preset(usize),

    /// Scroll a dropdown list so that this option is visible
    RevealOption(DropdownId, usize),
}

/// Identifies the picker instances hosted on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum PickerId {
    Primary,
    Secondary,
}

impl PickerId {
    pub fn title(self) -> &'static str {
        match self {
            Self::Primary => " 조회 기간 ",
            Self::Secondary => " 비교 기간 ",
        }
    }
}
