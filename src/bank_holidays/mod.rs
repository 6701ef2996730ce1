//! Bank holiday calendar: upstream feed client, domain model and shared cache.

mod api_types;
mod cached_client;
mod client;
mod types;

pub use cached_client::CachedBankHolidays;
pub use client::{BankHolidaySource, BankHolidaysClient};
pub use types::{BankHolidayCalendar, HolidayEvent, Region};
