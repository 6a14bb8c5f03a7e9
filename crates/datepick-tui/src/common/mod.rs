pub mod calendar;
pub mod geometry;

pub use calendar::{CALENDAR_HEIGHT, CALENDAR_WIDTH, CalendarWidget};
pub use geometry::{anchored_below, centered_rect};
