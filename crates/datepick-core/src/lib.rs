//! Date-range selection engine for a dual-calendar date picker: month grid generation,
//! independent start/end cursors, max-range enforcement, presets and the
//! open → accept/cancel transaction around the committed selection.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod controller;
pub mod deferred;
pub mod error;
mod macros;
pub mod models;
pub mod presets;
pub mod selector;
pub mod store;
pub mod utils;

pub use calendar::{CalendarGrid, GRID_CELLS, GridRequest, build_grid};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PickerConfig;
pub use controller::{PickerPhase, RangeSelectionController, TransientMessage};
pub use deferred::{Deferred, DeferredQueue};
pub use error::{PickerError, PickerResult};
pub use models::{
    CursorField, DateCursor, DayCell, DayKind, DropdownId, NavDirection, PickerValue,
    SelectionState, Side, Validator, first_validation_failure,
};
pub use presets::Preset;
pub use selector::{SelectorKey, SelectorOutcome, YearMonthSelector};
pub use store::{CursorState, DateCursorStore};
