use chrono::{Datelike, NaiveDate, Weekday};
use phf::phf_map;

use crate::calendar::{week_of_month, DAYS_PER_WEEK};

/// Three letter weekday codes, Sunday first.
pub const WEEKDAY_SHORT: [&str; DAYS_PER_WEEK] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

const WEEKDAY_NONE: &str = "none";

static WEEKDAYS_BY_SHORT: phf::Map<&'static str, Weekday> = phf_map! {
    "sun" => Weekday::Sun,
    "mon" => Weekday::Mon,
    "tue" => Weekday::Tue,
    "wed" => Weekday::Wed,
    "thu" => Weekday::Thu,
    "fri" => Weekday::Fri,
    "sat" => Weekday::Sat,
};

/// Left-pads `value` with zeros to at least `size` characters. Never truncates.
pub fn fill_zero_to(value: i64, size: usize) -> String {
    format!("{:0width$}", value, width = size)
}

pub fn fill_zero(value: i64) -> String {
    fill_zero_to(value, 2)
}

/// `YYYY-MM-DD` of `current`, with the day replaced by `day` if given.
pub fn format_date<D: Datelike>(current: &D, day: Option<u32>) -> String {
    let day = day.unwrap_or_else(|| current.day());

    format!(
        "{}-{}-{}",
        current.year(),
        fill_zero(i64::from(current.month())),
        fill_zero(i64::from(day))
    )
}

pub fn format_month<D: Datelike>(date: &D) -> String {
    format!("{}년 {}월", date.year(), date.month())
}

pub fn format_week(target: NaiveDate) -> String {
    let week = week_of_month(target);
    format!("{}년 {}월 {}주", week.year, week.month, week.week)
}

/// Weekday code for a Sunday-based index, `"none"` for anything outside `0..7`.
pub fn weekday_short_of_index(idx: usize) -> &'static str {
    WEEKDAY_SHORT.get(idx).copied().unwrap_or(WEEKDAY_NONE)
}

pub fn weekday_short<D: Datelike>(date: &D) -> &'static str {
    weekday_short_of_index(date.weekday().num_days_from_sunday() as usize)
}

pub fn parse_weekday_short(s: &str) -> Option<Weekday> {
    WEEKDAYS_BY_SHORT.get(s.trim().to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fill_zero_pads_to_two() {
        assert_eq!(fill_zero(5), "05");
        assert_eq!(fill_zero(12), "12");
        assert_eq!(fill_zero(0), "00");
    }

    #[test]
    fn fill_zero_never_truncates() {
        assert_eq!(fill_zero_to(123, 2), "123");
        assert_eq!(fill_zero_to(7, 4), "0007");
        assert_eq!(fill_zero_to(-5, 3), "-05");
    }

    #[test]
    fn format_date_uses_own_day() {
        assert_eq!(format_date(&date(2024, 1, 5), None), "2024-01-05");
        assert_eq!(format_date(&date(2024, 11, 30), None), "2024-11-30");
    }

    #[test]
    fn format_date_with_day() {
        assert_eq!(format_date(&date(2024, 1, 5), Some(20)), "2024-01-20");
        assert_eq!(format_date(&date(2024, 1, 5), Some(3)), "2024-01-03");
    }

    #[test]
    fn format_month_label() {
        assert_eq!(format_month(&date(2024, 1, 31)), "2024년 1월");
        assert_eq!(format_month(&date(2023, 12, 1)), "2023년 12월");
    }

    #[test]
    fn format_week_label() {
        assert_eq!(format_week(date(2024, 1, 3)), "2024년 1월 1주");
        assert_eq!(format_week(date(2024, 1, 10)), "2024년 1월 2주");
        assert_eq!(format_week(date(2024, 1, 31)), "2024년 2월 1주");
        assert_eq!(format_week(date(2023, 12, 31)), "2024년 1월 1주");
    }

    #[test]
    fn format_week_increases_monotonically() {
        // July 2024 starts on a Monday, its first Thursday is the 4th
        let labels: Vec<String> = (0..4)
            .map(|w| format_week(date(2024, 7, 1 + 7 * w)))
            .collect();

        assert_eq!(
            labels,
            vec![
                "2024년 7월 1주",
                "2024년 7월 2주",
                "2024년 7월 3주",
                "2024년 7월 4주"
            ]
        );
    }

    #[test]
    fn weekday_codes() {
        assert_eq!(weekday_short(&date(2024, 9, 1)), "sun");
        assert_eq!(weekday_short(&date(2024, 1, 1)), "mon");
        assert_eq!(weekday_short(&date(2024, 2, 29)), "thu");
        assert_eq!(weekday_short(&date(2024, 6, 1)), "sat");
    }

    #[test]
    fn weekday_index_out_of_range() {
        assert_eq!(weekday_short_of_index(3), "wed");
        assert_eq!(weekday_short_of_index(7), "none");
    }

    #[test]
    fn parse_weekday_codes() {
        assert_eq!(parse_weekday_short("fri"), Some(Weekday::Fri));
        assert_eq!(parse_weekday_short(" SUN "), Some(Weekday::Sun));
        assert_eq!(parse_weekday_short("none"), None);

        for (idx, code) in WEEKDAY_SHORT.iter().enumerate() {
            let weekday = parse_weekday_short(code).unwrap();
            assert_eq!(weekday.num_days_from_sunday() as usize, idx);
        }
    }

    #[test]
    fn format_week_at_date_bounds() {
        let last = format_week(NaiveDate::MAX);
        assert!(last.starts_with(&format!("{}년 12월", NaiveDate::MAX.year())));

        let first = format_week(NaiveDate::MIN);
        assert!(first.starts_with(&format!("{}년 1월", NaiveDate::MIN.year())));
    }
}
