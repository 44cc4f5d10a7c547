use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::calendar::{first_day_of_month, is_date_in_range, last_day_of_month};
use crate::error::{Error, ErrorKind, Result};

const ISO8601_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO8601_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub trait Eventlike {
    /// Raw date of the event, expected in an ISO 8601 form.
    fn date(&self) -> &str;

    fn parsed_date(&self) -> Result<NaiveDate> {
        parse_event_date(self.date())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Eventlike for Event {
    fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Default, Deserialize)]
struct EventList {
    #[serde(default)]
    events: Vec<Event>,
}

impl FromStr for EventList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|err| Error::new(ErrorKind::EventParse, &err.to_string()))
    }
}

/// Parses `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM[:SS]` or an RFC 3339
/// timestamp into its calendar date. Timestamps with an offset are moved into
/// local time first.
pub fn parse_event_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, ISO8601_DATE_FORMAT) {
        return Ok(date);
    }

    if let Some(dt) = ISO8601_LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date());
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .map_err(|err| {
            Error::new(
                ErrorKind::DateParse,
                &format!("Could not extract date from '{}': {}", s, err),
            )
        })
}

/// Events whose date falls on day-of-month `day`.
///
/// Only the day-of-month is compared; events from other months or years
/// match as well. Use [`events_in_range`] or [`events_of_month`] to narrow
/// down first.
pub fn events_for_day<'a, E, I>(events: I, day: u32) -> Vec<&'a E>
where
    E: Eventlike + 'a,
    I: IntoIterator<Item = &'a E>,
{
    events
        .into_iter()
        .filter(|event| match event.parsed_date() {
            Ok(date) => date.day() == day,
            Err(err) => {
                log::warn!("Skipping event: {}", err);
                false
            }
        })
        .collect()
}

pub fn events_in_range<'a, E, S, T>(events: &'a [E], start: &S, end: &T) -> Vec<&'a E>
where
    E: Eventlike,
    S: Datelike,
    T: Datelike,
{
    events
        .iter()
        .filter(|event| match event.parsed_date() {
            Ok(date) => is_date_in_range(&date, start, end),
            Err(err) => {
                log::warn!("Skipping event: {}", err);
                false
            }
        })
        .collect()
}

pub fn events_of_month<E: Eventlike>(events: &[E], date: NaiveDate) -> Vec<&E> {
    events_in_range(events, &first_day_of_month(date), &last_day_of_month(date))
}

pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    Ok(content.parse::<EventList>()?.events)
}

pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path).map_err(|err| {
        Error::from(err).with_msg(&format!("Could not read '{}'", path.display()))
    })?;

    let events = parse_events(&content).map_err(|err| {
        let msg = format!(
            "'{}': {}",
            path.display(),
            err.message.as_deref().unwrap_or_default()
        );
        err.with_msg(&msg)
    })?;

    log::debug!("Loaded {} events from '{}'", events.len(), path.display());

    Ok(events)
}
