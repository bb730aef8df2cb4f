//! The open/close and navigation logic of a calendar, independent of any rendering.

use chrono::{Datelike as _, NaiveDate};

use crate::grid::{self, DayCell, YearMonth};

/// Shown on the input while nothing has been picked.
pub const PLACEHOLDER_TEXT: &str = "Choose Date";

/// Everything a calendar input remembers between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CalendarState {
    /// The picked date, if any.
    pub selected: Option<NaiveDate>,

    /// The month shown in the popup. Navigating does not change [`Self::selected`].
    pub displayed: YearMonth,

    /// Is the popup showing?
    pub open: bool,
}

impl CalendarState {
    /// Both the selection and the displayed month are seeded from `initial_date`.
    /// Without one, nothing is selected and the month of `today` is displayed.
    pub fn new(initial_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            selected: initial_date,
            displayed: YearMonth::from_date(initial_date.unwrap_or(today)),
            open: false,
        }
    }

    /// Click on the input: open if closed, close if open.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the popup, keeping selection and displayed month.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// A pointer press landed outside the widget.
    ///
    /// Returns `true` if this closed the popup.
    pub fn outside_press(&mut self) -> bool {
        let was_open = self.open;
        self.close();
        was_open
    }

    /// Show the month before. Open state and selection are untouched.
    pub fn prev_month(&mut self) {
        self.displayed = self.displayed.pred();
    }

    /// Show the month after. Open state and selection are untouched.
    pub fn next_month(&mut self) {
        self.displayed = self.displayed.succ();
    }

    /// Pick `day` of the displayed month and close the popup.
    ///
    /// Returns the new selection, which the caller should report to its listener.
    /// If `day` does not exist in the displayed month nothing changes and `None` is returned.
    pub fn select_day(&mut self, day: u32) -> Option<NaiveDate> {
        let Some(date) = self.displayed.day(day) else {
            log::warn!("Ignoring day {day}: not a day of {}", self.displayed);
            return None;
        };
        self.selected = Some(date);
        self.open = false;
        Some(date)
    }

    /// The cells of the displayed month.
    pub fn cells(&self) -> Vec<DayCell> {
        grid::generate(self.displayed)
    }

    /// Is `day` of the displayed month the real-world `today`?
    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        today.day() == day && self.displayed.contains(today)
    }

    /// Is `day` of the displayed month the selected date?
    ///
    /// Only true while the displayed month is the month of the selection.
    pub fn is_selected(&self, day: u32) -> bool {
        self.selected
            .is_some_and(|selected| selected.day() == day && self.displayed.contains(selected))
    }

    /// Text of the input, see [`format_date`].
    pub fn display_text(&self) -> String {
        format_date(self.selected)
    }
}

/// `"D/M/YYYY"` without zero-padding, or [`PLACEHOLDER_TEXT`] for no date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        None => PLACEHOLDER_TEXT.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn formats_dates_without_padding() {
        assert_eq!(format_date(None), "Choose Date");
        assert_eq!(format_date(Some(date(2024, 3, 7))), "7/3/2024");
        assert_eq!(format_date(Some(date(2024, 12, 25))), "25/12/2024");
    }

    #[test]
    fn initial_state_follows_configuration() {
        let today = date(2026, 10, 17);

        let state = CalendarState::new(None, today);
        assert_eq!(state.selected, None);
        assert_eq!(state.displayed, YearMonth::new(2026, 10).unwrap());
        assert!(!state.open);
        assert_eq!(state.display_text(), PLACEHOLDER_TEXT);

        let state = CalendarState::new(Some(date(2024, 3, 7)), today);
        assert_eq!(state.selected, Some(date(2024, 3, 7)));
        assert_eq!(state.displayed, YearMonth::new(2024, 3).unwrap());
        assert!(!state.open);
        assert_eq!(state.display_text(), "7/3/2024");
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut state = CalendarState::new(None, date(2024, 1, 1));
        state.toggle();
        assert!(state.open);
        state.toggle();
        assert!(!state.open);
    }

    #[test]
    fn selecting_a_day_uses_displayed_month_and_closes() {
        let mut state = CalendarState::new(None, date(2024, 1, 10));
        state.toggle();
        state.next_month();
        state.next_month();

        assert_eq!(state.select_day(7), Some(date(2024, 3, 7)));
        assert_eq!(state.selected, Some(date(2024, 3, 7)));
        assert!(!state.open);
    }

    #[test]
    fn invalid_day_is_ignored() {
        let mut state = CalendarState::new(Some(date(2023, 2, 1)), date(2024, 1, 1));
        state.toggle();

        assert_eq!(state.select_day(29), None);
        assert_eq!(state.select_day(0), None);
        assert_eq!(state.selected, Some(date(2023, 2, 1)));
        assert!(state.open);
    }

    #[test]
    fn navigation_round_trips_across_year_boundary() {
        let mut state = CalendarState::new(Some(date(2024, 12, 5)), date(2024, 1, 1));
        state.toggle();

        state.next_month();
        assert_eq!(state.displayed, YearMonth::new(2025, 1).unwrap());
        state.prev_month();
        assert_eq!(state.displayed, YearMonth::new(2024, 12).unwrap());

        assert_eq!(state.selected, Some(date(2024, 12, 5)));
        assert!(state.open);
    }

    #[test]
    fn outside_press_only_closes() {
        let mut state = CalendarState::new(Some(date(2024, 5, 20)), date(2024, 1, 1));
        state.toggle();
        state.prev_month();
        let before = state;

        assert!(state.outside_press());
        assert!(!state.open);
        assert_eq!(state.selected, before.selected);
        assert_eq!(state.displayed, before.displayed);

        assert!(!state.outside_press());
    }

    #[test]
    fn highlighting_compares_against_displayed_month() {
        let today = date(2024, 3, 15);
        let mut state = CalendarState::new(Some(date(2024, 3, 7)), today);

        assert!(state.is_today(15, today));
        assert!(!state.is_today(7, today));
        assert!(state.is_selected(7));
        assert!(!state.is_selected(15));

        state.next_month();
        assert!(!state.is_today(15, today));
        assert!(!state.is_selected(7));

        let state = CalendarState::new(None, today);
        assert!(!state.is_selected(15));
    }

    #[test]
    fn cells_follow_displayed_month() {
        let mut state = CalendarState::new(Some(date(2024, 4, 1)), date(2024, 1, 1));
        assert_eq!(state.cells().first(), Some(&DayCell::Day(1)));
        state.next_month();
        assert_eq!(state.cells(), grid::generate(YearMonth::new(2024, 5).unwrap()));
    }
}
