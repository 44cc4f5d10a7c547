extern crate dalryeok as lib;

use chrono::{Datelike, Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::event::{events_for_day, events_of_month, load_events, parse_event_date, Event};
use lib::ui::{render_month, render_week};
use lib::Eventlike;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dr",
    about = "Dalryeok - calendar arithmetic on the command line."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "e",
        long = "events",
        help = "path to events file",
        parse(from_os_str)
    )]
    pub events: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, StructOpt)]
pub enum Cmd {
    #[structopt(about = "show the month grid containing DATE")]
    Month {
        #[structopt(help = "date as YYYY-MM-DD, defaults to today", parse(try_from_str = parse_event_date))]
        date: Option<NaiveDate>,
    },

    #[structopt(about = "show the week containing DATE")]
    Week {
        #[structopt(help = "date as YYYY-MM-DD, defaults to today", parse(try_from_str = parse_event_date))]
        date: Option<NaiveDate>,
    },

    #[structopt(about = "list the dates from START to END")]
    Days {
        #[structopt(help = "first date", parse(try_from_str = parse_event_date))]
        start: NaiveDate,

        #[structopt(help = "last date, inclusive", parse(try_from_str = parse_event_date))]
        end: NaiveDate,

        #[structopt(short = "i", long = "interval", help = "step in days")]
        interval: Option<i64>,
    },

    #[structopt(about = "show calendar facts about DATE")]
    Info {
        #[structopt(help = "date as YYYY-MM-DD, defaults to today", parse(try_from_str = parse_event_date))]
        date: Option<NaiveDate>,
    },

    #[structopt(about = "list the events on DATE")]
    Events {
        #[structopt(help = "date as YYYY-MM-DD, defaults to today", parse(try_from_str = parse_event_date))]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("Dalryeok ran into a fatal error!");
        eprintln!("Rerun with RUST_LOG=debug and --log-file to capture the events leading up to it");

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let events: Vec<Event> = match args.events.or_else(|| config.events_path()) {
        Some(path) => load_events(&path)?,
        None => Vec::new(),
    };

    let today = Local::now().date_naive();

    match args.cmd {
        Cmd::Month { date } => {
            let date = date.unwrap_or(today);
            let marked_days: Vec<u32> = events_of_month(&events, date)
                .iter()
                .filter_map(|event| event.parsed_date().ok())
                .map(|d| d.day())
                .collect();

            println!("{}", lib::format_month(&date));
            println!("{}", render_month(&lib::month_grid(&date), &marked_days));
        }
        Cmd::Week { date } => {
            let date = date.unwrap_or(today);

            println!("{}", lib::format_week(date));
            println!("{}", render_week(&lib::week_dates(date)));
        }
        Cmd::Days {
            start,
            end,
            interval,
        } => {
            let interval = interval.unwrap_or(config.interval);
            let dates = lib::remaining_dates_by_day(start, end, interval);

            if dates.is_empty() {
                log::info!(
                    "No dates between {} and {} with interval {}",
                    start,
                    end,
                    interval
                );
            }

            println!("{}", render_week(&dates));
        }
        Cmd::Info { date } => {
            let date = date.unwrap_or(today);

            println!("{} ({})", lib::format_date(&date, None), lib::weekday_short(&date));
            println!("{}", lib::format_week(date));
            println!(
                "leap year: {}",
                if lib::is_leap_year(&date) { "yes" } else { "no" }
            );
            println!(
                "days in month: {}",
                lib::days_in_month(date.year(), date.month() as i32)
            );
        }
        Cmd::Events { date } => {
            let date = date.unwrap_or(today);
            let month_events = events_of_month(&events, date);

            for event in events_for_day(month_events, date.day()) {
                let time = match (&event.start_time, &event.end_time) {
                    (Some(start), Some(end)) => format!("{}-{}", start, end),
                    (Some(start), None) => start.clone(),
                    _ => "all day".to_owned(),
                };
                println!("{} {} {}", lib::format_date(&date, None), time, event.title);
            }
        }
    }

    Ok(())
}
