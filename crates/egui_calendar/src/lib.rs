//! A date picker for [`egui`](https://github.com/emilk/egui): a labeled input that opens a
//! month calendar popup.
//!
//! ```
//! # egui::__run_test_ui(|ui| {
//! ui.add(egui_calendar::CalendarInput::new().label("Start date"));
//! # });
//! ```
//!
//! The logic is usable without egui too: [`CalendarState`] holds the open/close and
//! navigation state, and [`generate`] lays out the cells of a month.
//!
//! ## Feature flags
#![cfg_attr(feature = "document-features", doc = document_features::document_features!())]
//!

#![forbid(unsafe_code)]

mod grid;
mod state;
mod widget;

pub use crate::grid::{DayCell, InvalidMonth, YearMonth, generate};
pub use crate::state::{CalendarState, PLACEHOLDER_TEXT, format_date};
pub use crate::widget::{CalendarInput, DateBounds};

pub use chrono::NaiveDate;
