mod input;
mod popup;

pub use input::{CalendarInput, DateBounds};
