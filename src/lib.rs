pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod ui;

pub use calendar::*;
pub use error::{Error, ErrorKind, Result};
pub use event::{Event, Eventlike};
pub use format::*;
