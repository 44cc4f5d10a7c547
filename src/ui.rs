use chrono::NaiveDate;
use itertools::Itertools;

use crate::calendar::MonthGrid;
use crate::format::{format_date, weekday_short, WEEKDAY_SHORT};

const DAY_WIDTH: usize = 3;
const EVENT_MARK: char = '*';

fn cell(day: Option<u32>, marked_days: &[u32]) -> String {
    match day {
        Some(day) => {
            let mark = if marked_days.contains(&day) {
                EVENT_MARK
            } else {
                ' '
            };
            format!("{:>width$}{}", day, mark, width = DAY_WIDTH)
        }
        None => " ".repeat(DAY_WIDTH + 1),
    }
}

/// Renders a month grid as text, one line per week below a weekday header.
/// Days contained in `marked_days` get a trailing `*`.
pub fn render_month(grid: &MonthGrid, marked_days: &[u32]) -> String {
    let header = WEEKDAY_SHORT
        .iter()
        .map(|name| format!("{:>width$} ", name, width = DAY_WIDTH))
        .join("");

    std::iter::once(header)
        .chain(
            grid.rows()
                .iter()
                .map(|row| row.iter().map(|day| cell(*day, marked_days)).join("")),
        )
        .map(|line| line.trim_end().to_owned())
        .join("\n")
}

pub fn render_week(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| format!("{} {}", weekday_short(date), format_date(date, None)))
        .join("\n")
}
