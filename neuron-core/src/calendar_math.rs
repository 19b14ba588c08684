//! Calendar arithmetic.
//!
//! Month grids, the sliding week window, time-slot positioning and the date
//! equality primitives. Everything here is pure; the only clock access is
//! `today()`.

use std::fmt;

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Cells in a month grid: six Monday-first weeks.
pub const GRID_CELLS: usize = 42;

/// Days in the week view window.
pub const WEEK_WINDOW_DAYS: usize = 7;

/// Hour slots on the time axis.
pub const HOURS_PER_DAY: u32 = 24;

/// Duration assumed for events that have a start time but no end time.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A calendar month, independent of any particular day.
///
/// Stored as the first day of the month so every value is a real month.
/// Only months whose whole grid lies inside chrono's date range are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Returns None if `month` is not in 1..=12 or its grid would run past
    /// the representable date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .filter(|first| grid_fits(*first))
            .map(YearMonth)
    }

    /// The month containing `date`. In the first and last month of the date
    /// range this is the adjacent month instead.
    pub fn of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        if grid_fits(first) {
            return YearMonth(first);
        }

        let inward = if first.year() > 0 {
            first.checked_sub_months(Months::new(1))
        } else {
            first.checked_add_months(Months::new(1))
        };
        YearMonth(inward.unwrap_or(first))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn days_in_month(&self) -> u32 {
        self.0
            .iter_days()
            .take_while(|d| d.month() == self.0.month())
            .count() as u32
    }

    /// Shift by `months` in either direction. A shift that would leave the
    /// valid range returns `self` unchanged.
    pub fn offset(&self, months: i32) -> Self {
        let step = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(step)
        } else {
            self.0.checked_sub_months(step)
        };
        shifted
            .filter(|first| grid_fits(*first))
            .map(YearMonth)
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Serialized as `"YYYY-MM"`.
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

fn grid_fits(first: NaiveDate) -> bool {
    let lead = Days::new(u64::from(first.weekday().num_days_from_monday()));
    first
        .checked_sub_days(lead)
        .and_then(|start| start.checked_add_days(Days::new(GRID_CELLS as u64 - 1)))
        .is_some()
}

/// Column of the 1st of the month in a Monday-first week (Monday = 0).
pub fn first_day_index(month: YearMonth) -> usize {
    // Equivalent to (weekday + 6) % 7 with Sunday = 0.
    month.first_day().weekday().num_days_from_monday() as usize
}

/// The 42 dates of a month grid: trailing days of the previous month, every
/// day of `month`, then leading days of the next month.
pub fn month_grid(month: YearMonth) -> [NaiveDate; GRID_CELLS] {
    let start = add_days(month.first_day(), -(first_day_index(month) as i64));
    std::array::from_fn(|i| add_days(start, i as i64))
}

/// Seven days centred on `selected`: three before, three after.
pub fn week_window(selected: NaiveDate) -> [NaiveDate; WEEK_WINDOW_DAYS] {
    let half = (WEEK_WINDOW_DAYS / 2) as i64;
    std::array::from_fn(|i| add_days(selected, i as i64 - half))
}

/// Move `date` by `days`, saturating at chrono's date range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    moved.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Where an event sits on the time axis, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPosition {
    /// Minutes since midnight of the start time.
    pub offset_minutes: u32,
    pub duration_minutes: u32,
}

impl SlotPosition {
    pub fn end_minutes(&self) -> u32 {
        self.offset_minutes + self.duration_minutes
    }
}

/// Position an event on the time axis.
///
/// Returns None without a start time (all-day events). Without an end time,
/// or with an end time before the start (data that bypassed validation), the
/// duration is `DEFAULT_DURATION_MINUTES`.
pub fn time_slot_position(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<SlotPosition> {
    let offset_minutes = minutes_since_midnight(start?);

    let duration_minutes = match end.map(minutes_since_midnight) {
        Some(end) if end >= offset_minutes => end - offset_minutes,
        _ => DEFAULT_DURATION_MINUTES,
    };

    Some(SlotPosition {
        offset_minutes,
        duration_minutes,
    })
}

fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Pixel scale of the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub hour_height: f32,
    pub min_event_height: f32,
}

impl SlotGeometry {
    pub fn day_height(&self) -> f32 {
        HOURS_PER_DAY as f32 * self.hour_height
    }

    pub fn hour_top(&self, hour: u32) -> f32 {
        hour as f32 * self.hour_height
    }

    /// Top offset and height in pixels. Height is proportional to duration,
    /// cut off at the end of the day and never below `min_event_height`.
    pub fn place(&self, slot: &SlotPosition) -> (f32, f32) {
        let top = slot.offset_minutes as f32 / 60.0 * self.hour_height;
        let height = (slot.duration_minutes as f32 / 60.0 * self.hour_height)
            .min(self.day_height() - top)
            .max(self.min_event_height);
        (top, height)
    }
}

impl Default for SlotGeometry {
    fn default() -> Self {
        SlotGeometry {
            hour_height: 60.0,
            min_event_height: 20.0,
        }
    }
}

/// Calendar-day equality. Any time-of-day component is ignored.
pub fn is_same_date<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Whether `date` is today on the local clock.
pub fn is_today<D: Datelike>(date: &D) -> bool {
    is_same_date(date, &today())
}

/// Today's date on the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Header label, e.g. "March 2024".
pub fn month_title(month: YearMonth) -> String {
    month.first_day().format("%B %Y").to_string()
}

pub fn weekday_labels() -> [&'static str; 7] {
    WEEKDAY_LABELS
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn leading_cells(month: YearMonth) -> usize {
        month_grid(month)
            .iter()
            .take_while(|d| !month.contains(**d))
            .count()
    }

    #[test]
    fn test_year_month_rejects_invalid_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert!(YearMonth::new(2024, 12).is_some());
    }

    #[test]
    fn test_year_month_offset_crosses_years() {
        let march = YearMonth::new(2024, 3).unwrap();
        assert_eq!(march.next(), YearMonth::new(2024, 4).unwrap());
        assert_eq!(march.offset(10), YearMonth::new(2025, 1).unwrap());
        assert_eq!(march.offset(-3), YearMonth::new(2023, 12).unwrap());
        assert_eq!(YearMonth::new(2024, 1).unwrap().prev(), YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_month_starting_monday_has_no_leading_cells() {
        // 1 April 2024 is a Monday.
        let april = YearMonth::new(2024, 4).unwrap();
        assert_eq!(first_day_index(april), 0);
        assert_eq!(leading_cells(april), 0);
        assert_eq!(month_grid(april)[0], date(2024, 4, 1));
    }

    #[test]
    fn test_month_starting_sunday_has_six_leading_cells() {
        // 1 September 2024 is a Sunday.
        let september = YearMonth::new(2024, 9).unwrap();
        assert_eq!(first_day_index(september), 6);
        assert_eq!(leading_cells(september), 6);
        assert_eq!(month_grid(september)[0], date(2024, 8, 26));
        assert_eq!(month_grid(september)[6], date(2024, 9, 1));
    }

    #[test]
    fn test_month_grid_pads_from_next_month() {
        // February 2021 starts on Monday and fills exactly four rows.
        let grid = month_grid(YearMonth::new(2021, 2).unwrap());
        assert_eq!(grid[27], date(2021, 2, 28));
        assert_eq!(grid[28], date(2021, 3, 1));
        assert_eq!(grid[41], date(2021, 3, 14));
    }

    #[test]
    fn test_week_window_is_centred_on_selection() {
        let window = week_window(date(2024, 3, 1));
        assert_eq!(window[0], date(2024, 2, 27));
        assert_eq!(window[3], date(2024, 3, 1));
        assert_eq!(window[6], date(2024, 3, 4));
    }

    #[test]
    fn test_time_slot_position_standup() {
        let slot = time_slot_position(Some(time(9, 0)), Some(time(9, 30))).unwrap();
        assert_eq!(slot.offset_minutes, 540);
        assert_eq!(slot.duration_minutes, 30);
        assert_eq!(slot.end_minutes(), 570);
    }

    #[test]
    fn test_time_slot_position_defaults_duration_without_end() {
        let slot = time_slot_position(Some(time(14, 15)), None).unwrap();
        assert_eq!(slot.offset_minutes, 855);
        assert_eq!(slot.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_time_slot_position_end_before_start_uses_default() {
        let slot = time_slot_position(Some(time(10, 0)), Some(time(9, 0))).unwrap();
        assert_eq!(slot.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_time_slot_position_all_day_is_none() {
        assert_eq!(time_slot_position(None, None), None);
        assert_eq!(time_slot_position(None, Some(time(10, 0))), None);
    }

    #[test]
    fn test_slot_geometry_applies_min_height() {
        let geometry = SlotGeometry::default();
        let zero = SlotPosition {
            offset_minutes: 600,
            duration_minutes: 0,
        };
        assert_eq!(geometry.place(&zero), (600.0, 20.0));

        let half_hour = SlotPosition {
            offset_minutes: 540,
            duration_minutes: 30,
        };
        assert_eq!(geometry.place(&half_hour), (540.0, 30.0));
    }

    #[test]
    fn test_slot_geometry_cuts_off_at_midnight() {
        let geometry = SlotGeometry::default();
        let late = SlotPosition {
            offset_minutes: 23 * 60 + 30,
            duration_minutes: 60,
        };
        let (top, height) = geometry.place(&late);
        assert_eq!(top + height, geometry.day_height());
    }

    #[test]
    fn test_is_same_date_ignores_time_of_day() {
        let morning = date(2024, 3, 4).and_hms_opt(0, 0, 1).unwrap();
        let night = date(2024, 3, 4).and_hms_opt(23, 59, 59).unwrap();
        assert!(is_same_date(&morning, &night));
        assert!(is_same_date(&morning, &date(2024, 3, 4)));
        assert!(!is_same_date(&night, &date(2024, 3, 5)));
    }

    #[test]
    fn test_is_today() {
        let before = today();
        let hit = is_today(&before);
        let after = today();

        assert!(hit || before != after);
        assert!(!is_today(&add_days(before, 2)));
        assert!(!is_today(&add_days(before, -2)));
    }

    #[test]
    fn test_year_month_rejects_months_at_range_edges() {
        let last = NaiveDate::MAX;
        let first = NaiveDate::MIN;

        assert_eq!(YearMonth::new(last.year(), last.month()), None);

        let edge = YearMonth::of(last);
        assert!(edge < YearMonth(last.with_day(1).unwrap()));
        assert_eq!(edge.next(), edge);

        let start = YearMonth::of(first);
        assert!(month_grid(start)[0] >= first);
        assert_eq!(start.offset(-1), start);
    }

    #[test]
    fn test_month_grid_near_range_end_is_strictly_increasing() {
        let edge = YearMonth::of(NaiveDate::MAX);
        let grid = month_grid(edge);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert!(edge.contains(grid[first_day_index(edge)]));
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(YearMonth::new(2024, 3).unwrap()), "March 2024");
        assert_eq!(YearMonth::new(2024, 3).unwrap().to_string(), "2024-03");
    }

    proptest! {
        #[test]
        fn month_grid_covers_month_exactly_once(year in 1600i32..2400, month in 1u32..=12) {
            let ym = YearMonth::new(year, month).unwrap();
            let grid = month_grid(ym);

            prop_assert_eq!(grid.len(), GRID_CELLS);
            for pair in grid.windows(2) {
                prop_assert_eq!(add_days(pair[0], 1), pair[1]);
            }

            let in_month: Vec<u32> = grid
                .iter()
                .filter(|d| ym.contains(**d))
                .map(|d| d.day())
                .collect();
            let expected: Vec<u32> = (1..=ym.days_in_month()).collect();
            prop_assert_eq!(in_month, expected);
            prop_assert_eq!(grid[0].weekday(), chrono::Weekday::Mon);
        }

        #[test]
        fn is_same_date_is_reflexive_and_symmetric(
            a in 0i64..200_000,
            b in 0i64..200_000,
            secs_a in 0u32..86_400,
            secs_b in 0u32..86_400,
        ) {
            let base = date(1900, 1, 1);
            let da = add_days(base, a);
            let db = add_days(base, b);
            let ta = da.and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs_a, 0).unwrap());
            let tb = db.and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs_b, 0).unwrap());

            prop_assert!(is_same_date(&da, &da));
            prop_assert!(is_same_date(&ta, &da));
            prop_assert_eq!(is_same_date(&ta, &tb), is_same_date(&tb, &ta));
            prop_assert_eq!(is_same_date(&ta, &tb), a == b);
        }
    }
}
