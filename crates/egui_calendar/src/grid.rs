//! Month arithmetic and the cell layout of a month view.

use chrono::{Datelike as _, Month, NaiveDate, Weekday};

/// A calendar month. Only the year and month are meaningful; there is no day.
///
/// The month is 1-based (January is `1`) and always in `1..=12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "(i32, u32)", into = "(i32, u32)")
)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

/// A month number outside `1..=12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMonth(pub u32);

impl std::fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month {}, expected 1..=12", self.0)
    }
}

impl std::error::Error for InvalidMonth {}

impl TryFrom<(i32, u32)> for YearMonth {
    type Error = InvalidMonth;

    fn try_from((year, month): (i32, u32)) -> Result<Self, Self::Error> {
        Self::new(year, month).ok_or(InvalidMonth(month))
    }
}

impl From<YearMonth> for (i32, u32) {
    fn from(month: YearMonth) -> Self {
        (month.year, month.month)
    }
}

impl YearMonth {
    /// `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based.
    #[inline]
    pub fn month(self) -> u32 {
        self.month
    }

    /// The month that `date` falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The 1st of this month, or `None` if the year is outside what [`NaiveDate`] can represent.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The date with the given day of this month, if there is such a day.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// The following month. December rolls over into January of the next year.
    #[must_use]
    pub fn succ(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The preceding month. January rolls back into December of the previous year.
    #[must_use]
    pub fn pred(self) -> Self {
        if self.month <= 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of days in this month.
    ///
    /// This is the day before the 1st of the following month.
    /// Returns `0` for months [`NaiveDate`] cannot represent.
    pub fn days_in_month(self) -> u32 {
        if self.first_day().is_none() {
            return 0;
        }
        let next = self.succ();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map_or_else(|| self.last_representable_day(), |last| last.day())
    }

    /// Handles the very last month chrono supports, whose successor is out of range.
    fn last_representable_day(self) -> u32 {
        (28..=31)
            .rev()
            .find(|&day| self.day(day).is_some())
            .unwrap_or(0)
    }

    /// Weekday of the 1st of this month.
    pub fn first_weekday(self) -> Option<Weekday> {
        self.first_day().map(|first| first.weekday())
    }

    /// Number of blank cells before day 1 in a grid whose weeks start on Monday.
    ///
    /// Always in `0..=6`, and `0` exactly when the month starts on a Monday.
    /// `0` as well for months [`NaiveDate`] cannot represent.
    pub fn empty_prefix(self) -> usize {
        self.first_weekday()
            .map_or(0, |weekday| weekday.num_days_from_monday() as usize)
    }

    /// Does `date` fall in this month?
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English name of the month, e.g. `"March"`.
    pub fn name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name())
    }

    /// Header text of the popup, e.g. `"March 2024"`.
    pub fn title(self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One slot of the month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DayCell {
    /// Padding so that day 1 lands under its weekday column.
    Empty,

    /// A 1-based day of the displayed month.
    Day(u32),
}

impl DayCell {
    /// The day of month, or `None` for padding.
    #[inline]
    pub fn day(self) -> Option<u32> {
        match self {
            Self::Empty => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// The cells needed to draw `month` in a Monday-first grid.
///
/// That is [`YearMonth::empty_prefix`] [`DayCell::Empty`] cells followed by
/// `Day(1)..=Day(days_in_month)`. There is no trailing padding, so the length
/// varies with the month.
pub fn generate(month: YearMonth) -> Vec<DayCell> {
    let days_in_month = month.days_in_month();
    if days_in_month == 0 {
        log::warn!("Cannot lay out {month}: outside the supported date range");
        return Vec::new();
    }

    let empty_prefix = month.empty_prefix();
    let mut cells = Vec::with_capacity(empty_prefix + days_in_month as usize);
    cells.extend(std::iter::repeat_n(DayCell::Empty, empty_prefix));
    cells.extend((1..=days_in_month).map(DayCell::Day));
    cells
}

#[cfg(test)]
mod tests {
    use chrono::Datelike as _;

    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    /// `0 = Sunday .. 6 = Saturday`, mapped to a Monday-first offset.
    fn prefix_from_sunday_index(first_weekday: u32) -> usize {
        if first_weekday == 0 {
            6
        } else {
            first_weekday as usize - 1
        }
    }

    fn every_month(years: std::ops::RangeInclusive<i32>) -> impl Iterator<Item = YearMonth> {
        years.flat_map(|year| (1..=12).map(move |month| ym(year, month)))
    }

    #[test]
    fn grid_is_prefix_then_all_days() {
        for month in every_month(1899..=2101) {
            let cells = generate(month);
            let prefix = month.empty_prefix();
            let days = month.days_in_month();

            assert_eq!(cells.len(), prefix + days as usize, "{month}");
            assert!(cells[..prefix].iter().all(|cell| *cell == DayCell::Empty));

            let suffix: Vec<u32> = cells[prefix..].iter().filter_map(|c| c.day()).collect();
            assert_eq!(suffix, (1..=days).collect::<Vec<_>>(), "{month}");
        }
    }

    #[test]
    fn empty_prefix_matches_sunday_based_formula() {
        for month in every_month(1970..=2040) {
            let first = month.first_day().unwrap();
            let sunday_index = first.weekday().num_days_from_sunday();
            let prefix = month.empty_prefix();

            assert_eq!(prefix, prefix_from_sunday_index(sunday_index), "{month}");
            assert!(prefix <= 6);
            assert_eq!(prefix == 0, first.weekday() == Weekday::Mon, "{month}");
        }
    }

    #[test]
    fn known_layouts() {
        // 1 April 2024 was a Monday.
        assert_eq!(ym(2024, 4).empty_prefix(), 0);
        assert_eq!(generate(ym(2024, 4)).len(), 30);

        // 1 September 2024 was a Sunday.
        let september = generate(ym(2024, 9));
        assert_eq!(september.len(), 6 + 30);
        assert_eq!(september[6], DayCell::Day(1));

        // 1 February 2026 is a Sunday, 28 days.
        assert_eq!(generate(ym(2026, 2)).len(), 6 + 28);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2023, 2).days_in_month(), 28);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2024, 12).days_in_month(), 31);
        assert_eq!(ym(2024, 11).days_in_month(), 30);
    }

    #[test]
    fn generate_is_deterministic() {
        let month = ym(2031, 7);
        assert_eq!(generate(month), generate(month));
    }

    #[test]
    fn succ_and_pred_roll_over_years() {
        let december = ym(2024, 12);
        assert_eq!(december.succ(), ym(2025, 1));
        assert_eq!(december.succ().pred(), december);
        assert_eq!(ym(2025, 1).pred(), december);

        for month in every_month(1999..=2001) {
            assert_eq!(month.succ().pred(), month);
            assert_eq!(month.pred().succ(), month);
        }
    }

    #[test]
    fn unrepresentable_month_is_empty() {
        let far_future = ym(i32::MAX, 6);
        assert_eq!(far_future.days_in_month(), 0);
        assert!(generate(far_future).is_empty());
    }

    #[test]
    fn names_and_titles() {
        assert_eq!(ym(2024, 1).name(), "January");
        assert_eq!(ym(2024, 12).name(), "December");
        assert_eq!(ym(2024, 3).title(), "March 2024");
        assert_eq!(ym(2024, 3).to_string(), "2024-03");
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert_eq!(YearMonth::new(2024, 0), None);
        assert_eq!(YearMonth::new(2024, 13), None);
        assert_eq!(YearMonth::try_from((2024, 13)), Err(InvalidMonth(13)));
        assert_eq!(YearMonth::try_from((2024, 2)), Ok(ym(2024, 2)));

        let month = ym(2024, 12);
        assert_eq!((month.year(), month.month()), (2024, 12));
        assert_eq!(<(i32, u32)>::from(month), (2024, 12));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_validates_the_month() {
        let month: YearMonth = ron::from_str("(2024, 3)").unwrap();
        assert_eq!(month, ym(2024, 3));
        assert_eq!(ron::to_string(&month).unwrap(), "(2024,3)");

        assert!(ron::from_str::<YearMonth>("(2024, 13)").is_err());
        assert!(ron::from_str::<YearMonth>("(2024, 0)").is_err());
    }
}
