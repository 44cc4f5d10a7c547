use chrono::{Datelike, Days, Duration, Month, NaiveDate, Weekday};
use derive_more::{Deref, From};
use num_traits::FromPrimitive;
use std::convert::TryFrom;

pub const DAYS_PER_WEEK: usize = 7;

/// One row of a month grid, Sunday at index 0. Slots outside the month are `None`.
pub type WeekRow = [Option<u32>; DAYS_PER_WEEK];

/// Sunday-first rows covering one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From)]
pub struct MonthGrid(Vec<WeekRow>);

impl MonthGrid {
    pub fn rows(&self) -> &[WeekRow] {
        &self.0
    }

    pub fn into_rows(self) -> Vec<WeekRow> {
        self.0
    }

    /// Iterates over all days of the grid in order, skipping empty slots.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().flat_map(|row| row.iter().filter_map(|slot| *slot))
    }
}

/// Week position of a date, anchored to the Thursday of its Sunday-first week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekOfMonth {
    pub year: i32,
    pub month: u32,
    pub week: u32,
}

fn leap_rule(year: i64) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

pub fn is_leap(year: i32) -> bool {
    leap_rule(i64::from(year))
}

pub fn is_leap_year<D: Datelike>(date: &D) -> bool {
    is_leap(date.year())
}

fn month_length(month: Month, leap: bool) -> u32 {
    match month {
        Month::February if leap => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

fn days_of_month(month: Month, year: i32) -> u32 {
    let next_first = if month == Month::December {
        year
            .checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    // Last day of `month` is the day before the first of the next one.
    match next_first.and_then(|d| d.pred_opt()) {
        Some(last) => last.day(),
        // Outside of chrono's representable range
        None => month_length(month, is_leap(year)),
    }
}

/// Number of days in the 1-indexed `month` of `year`.
///
/// Months outside `1..=12` roll over into neighbouring years, so month 13 is
/// January of `year + 1` and month 0 is December of `year - 1`.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    let index = i64::from(year) * 12 + i64::from(month) - 1;
    let month = Month::from_i64(index.rem_euclid(12) + 1).unwrap_or(Month::January);

    match i32::try_from(index.div_euclid(12)) {
        Ok(year) => days_of_month(month, year),
        // Rolled past the range of `i32` years
        Err(_) => month_length(month, leap_rule(index.div_euclid(12))),
    }
}

/// Weekday of the first day of the month `date` lies in, 0 = Sunday.
pub fn first_weekday_of_month<D: Datelike>(date: &D) -> u32 {
    (date.weekday().num_days_from_sunday() + 7 - date.day0() % 7) % 7
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let days = days_in_month(date.year(), date.month() as i32);
    date + Duration::days(i64::from(days - date.day()))
}

/// Moves `date` by `days`, clamping at the bounds of `NaiveDate`.
fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// The seven dates of the Sunday-to-Saturday week containing `date`.
///
/// Days of a week crossing the bounds of `NaiveDate` are clamped to
/// `NaiveDate::MIN`/`NaiveDate::MAX`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let weekday = i64::from(date.weekday().num_days_from_sunday());

    let mut week = [date; DAYS_PER_WEEK];
    for (offset, day) in week.iter_mut().enumerate() {
        *day = shift_days(date, offset as i64 - weekday);
    }

    week
}

/// Lays out the month containing `current` as Sunday-first week rows.
pub fn month_grid<D: Datelike>(current: &D) -> MonthGrid {
    let days = days_in_month(current.year(), current.month() as i32);
    let first_weekday = first_weekday_of_month(current);

    let mut rows = Vec::new();
    let mut row: WeekRow = [None; DAYS_PER_WEEK];

    for day in 1..=days {
        let idx = ((first_weekday + day - 1) % DAYS_PER_WEEK as u32) as usize;
        row[idx] = Some(day);

        if idx == DAYS_PER_WEEK - 1 || day == days {
            rows.push(row);
            row = [None; DAYS_PER_WEEK];
        }
    }

    MonthGrid(rows)
}

/// Thursday of the Sunday-first week containing `date`, clamped to the
/// bounds of `NaiveDate`.
pub fn thursday_of_week(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(Weekday::Thu.num_days_from_sunday())
        - i64::from(date.weekday().num_days_from_sunday());
    shift_days(date, offset)
}

/// Locates `date` in its month's week numbering.
///
/// A week belongs to the month its Thursday falls into; week 1 is the one
/// holding that month's first Thursday.
pub fn week_of_month(date: NaiveDate) -> WeekOfMonth {
    let thursday = thursday_of_week(date);
    let thu = Weekday::Thu.num_days_from_sunday();

    let first_weekday = first_weekday_of_month(&thursday);
    let first_thursday = 1 + (thu + 7 - first_weekday) % 7;

    WeekOfMonth {
        year: thursday.year(),
        month: thursday.month(),
        week: thursday.day().saturating_sub(first_thursday) / 7 + 1,
    }
}

/// Inclusive range check on calendar dates, time of day is ignored.
pub fn is_date_in_range<D, S, E>(date: &D, start: &S, end: &E) -> bool
where
    D: Datelike,
    S: Datelike,
    E: Datelike,
{
    let day = date.num_days_from_ce();
    start.num_days_from_ce() <= day && day <= end.num_days_from_ce()
}

/// Dates from `start` up to and including `end`, `interval` days apart.
///
/// Empty if `end` lies before `start` or `interval` is not positive.
pub fn remaining_dates_by_day(start: NaiveDate, end: NaiveDate, interval: i64) -> Vec<NaiveDate> {
    if end < start || interval <= 0 {
        return Vec::new();
    }

    let step = Days::new(interval as u64);

    std::iter::successors(Some(start), |date| date.checked_add_days(step))
        .take_while(|date| *date <= end)
        .collect()
}

pub fn remaining_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    remaining_dates_by_day(start, end, 1)
}
