/// Store modules that hold application state
/// Each store is responsible for a slice of the application state
pub mod picker_store;
pub mod ui_store;

pub use picker_store::{PickerStore, PickerView};
pub use ui_store::UIStore;
