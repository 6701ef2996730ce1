//! Working-day calculations against the published UK bank holiday calendar.
//!
//! [`CachedBankHolidays`] owns the process-wide, time-boxed copy of the
//! calendar; [`WorkingDayCalculator`] answers "is this a working day" and
//! "what is N working days from this date" on top of it.

pub mod bank_holidays;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod working_days;

pub use bank_holidays::{
  BankHolidayCalendar, BankHolidaySource, BankHolidaysClient, CachedBankHolidays, HolidayEvent,
  Region,
};
pub use config::Config;
pub use error::{FetchError, UpstreamUnavailable, WorkingDayError};
pub use working_days::WorkingDayCalculator;
