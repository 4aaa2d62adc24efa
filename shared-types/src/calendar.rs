use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells in a month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("`{0}` is not a YYYY-MM-DD date")]
    InvalidDate(String),
}

/// A timezone-free calendar day. Serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the viewer's local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn parse(text: &str) -> Result<Self, CalendarError> {
        NaiveDate::parse_from_str(text.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|_| CalendarError::InvalidDate(text.to_string()))
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn iso(self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// "November 2025"
    pub fn month_label(self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// Saturates at the ends of chrono's supported range.
    pub fn add_days(self, days: i64) -> Self {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Self)
            .unwrap_or(self)
    }

    /// Moves by whole months, clamping the day to the target month's length
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(self, months: i32) -> Self {
        let total = self.0.year() * 12 + self.0.month0() as i32 + months;
        let year = total.div_euclid(12);
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.0.day().min(days_in_month(year, month));
        Self::from_ymd(year, month, day).unwrap_or(self)
    }

    pub fn start_of_month(self) -> Self {
        self.0.with_day(1).map(Self).unwrap_or(self)
    }

    /// 0 for Sunday through 6 for Saturday.
    pub fn weekday_from_sunday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn same_month(self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub day: u32,
    pub in_month: bool,
    /// Strictly before today.
    pub past: bool,
    pub selected: bool,
}

impl CalendarCell {
    pub fn key(&self) -> String {
        self.date.iso()
    }

    pub fn is_selectable(&self) -> bool {
        self.in_month && !self.past
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the displayed month.
    pub month: CalendarDate,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn label(&self) -> String {
        self.month.month_label()
    }

    pub fn previous_month(&self) -> CalendarDate {
        self.month.add_months(-1)
    }

    pub fn next_month(&self) -> CalendarDate {
        self.month.add_months(1)
    }

    /// Returns the date when the cell can be picked.
    pub fn pick(&self, date: CalendarDate) -> Option<CalendarDate> {
        self.cells
            .iter()
            .find(|cell| cell.date == date && cell.is_selectable())
            .map(|cell| cell.date)
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Lays out the displayed month as six Sunday-first weeks, starting on the
/// Sunday on or before the 1st.
pub fn month_grid(
    displayed: CalendarDate,
    selected: Option<CalendarDate>,
    today: CalendarDate,
) -> MonthGrid {
    let first = displayed.start_of_month();
    let grid_start = first.add_days(-(first.weekday_from_sunday() as i64));

    let cells = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start.add_days(offset);
            CalendarCell {
                date,
                day: date.day(),
                in_month: date.same_month(first),
                past: date < today,
                selected: selected == Some(date),
            }
        })
        .collect();

    MonthGrid {
        month: first,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> CalendarDate {
        CalendarDate::parse(text).unwrap()
    }

    #[test]
    fn parses_and_formats_iso_dates() {
        let d = date("2025-11-03");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 11, 3));
        assert_eq!(d.iso(), "2025-11-03");
        assert_eq!(d.to_string(), "2025-11-03");
        assert!(CalendarDate::parse("11/03/2025").is_err());
        assert!(CalendarDate::parse("2025-02-30").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&date("2025-01-09")).unwrap();
        assert_eq!(json, "\"2025-01-09\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date("2025-01-09"));
    }

    #[test]
    fn add_months_clamps_day_and_crosses_years() {
        assert_eq!(date("2025-01-31").add_months(1), date("2025-02-28"));
        assert_eq!(date("2024-01-31").add_months(1), date("2024-02-29"));
        assert_eq!(date("2025-12-15").add_months(1), date("2026-01-15"));
        assert_eq!(date("2025-01-15").add_months(-1), date("2024-12-15"));
        assert_eq!(date("2025-03-31").add_months(-13), date("2024-02-29"));
    }

    #[test]
    fn weekday_counts_from_sunday() {
        // 2025-11-02 is a Sunday.
        assert_eq!(date("2025-11-02").weekday_from_sunday(), 0);
        assert_eq!(date("2025-11-08").weekday_from_sunday(), 6);
    }

    #[test]
    fn grid_has_six_sunday_first_weeks_for_every_month() {
        let today = date("2000-01-01");
        let mut month = date("2020-01-01");
        while month < date("2031-01-01") {
            let grid = month_grid(month, None, today);
            assert_eq!(grid.cells.len(), GRID_CELLS);

            let first = &grid.cells[0];
            assert_eq!(first.date.weekday_from_sunday(), 0, "{month}");
            assert!(first.date <= month);
            assert!(month.add_days(-7) < first.date);

            for pair in grid.cells.windows(2) {
                assert_eq!(pair[0].date.add_days(1), pair[1].date);
            }

            let in_month = grid.cells.iter().filter(|c| c.in_month).count() as u32;
            assert_eq!(in_month, days_in_month(month.year(), month.month()));
            assert_eq!(grid.weeks().count(), 6);

            month = month.add_months(1);
        }
    }

    #[test]
    fn today_is_never_disabled_but_earlier_days_are() {
        let today = date("2025-11-12");
        let grid = month_grid(today, None, today);

        let today_cell = grid.cells.iter().find(|c| c.date == today).unwrap();
        assert!(!today_cell.past);
        assert!(today_cell.is_selectable());

        for cell in grid.cells.iter().filter(|c| c.date < today) {
            assert!(cell.past);
            assert!(!cell.is_selectable());
        }
        assert!(grid.cells.iter().filter(|c| c.date > today).all(|c| !c.past));
    }

    #[test]
    fn out_of_month_cells_are_not_selectable() {
        let today = date("2025-01-01");
        let grid = month_grid(date("2025-11-01"), None, today);
        // 2025-11-01 is a Saturday, so the grid opens on Oct 26.
        assert_eq!(grid.cells[0].date, date("2025-10-26"));
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.pick(date("2025-10-26")), None);
        assert_eq!(grid.pick(date("2025-11-20")), Some(date("2025-11-20")));
    }

    #[test]
    fn navigation_keeps_selection() {
        let selected = date("2025-11-20");
        let today = date("2025-11-01");
        let grid = month_grid(selected, Some(selected), today);
        assert_eq!(grid.cells.iter().filter(|c| c.selected).count(), 1);

        let next = month_grid(grid.next_month(), Some(selected), today);
        assert_eq!(next.label(), "December 2025");
        assert!(next.cells.iter().all(|c| !c.selected));

        let back = month_grid(next.previous_month(), Some(selected), today);
        assert_eq!(back, grid);
    }
}
