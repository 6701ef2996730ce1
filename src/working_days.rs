//! Working-day arithmetic over weekends and published bank holidays.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use std::collections::HashSet;

use crate::bank_holidays::{BankHolidaySource, CachedBankHolidays, Region};
use crate::error::WorkingDayError;

const ONE_DAY: Days = Days::new(1);

/// Monday to Friday and not in `holidays`.
pub fn is_working_day_in(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
  !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// First working day strictly after `date`, or `None` past the end of the calendar.
pub fn next_working_day_after(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> Option<NaiveDate> {
  let mut next = date.checked_add_days(ONE_DAY)?;
  while !is_working_day_in(next, holidays) {
    next = next.checked_add_days(ONE_DAY)?;
  }
  Some(next)
}

/// Step forward `number_of_days` working days from `from_date`.
///
/// Zero steps returns `from_date` unchanged, whether or not it is a working day.
pub fn add_working_days(
  from_date: NaiveDate,
  number_of_days: u32,
  holidays: &HashSet<NaiveDate>,
) -> Option<NaiveDate> {
  (0..number_of_days).try_fold(from_date, |current, _| {
    next_working_day_after(current, holidays)
  })
}

/// Deadline calculator backed by the shared bank holiday cache.
///
/// Stateless apart from the cache handle; every call reads one calendar
/// snapshot and scans forward against it.
pub struct WorkingDayCalculator<S> {
  holidays: CachedBankHolidays<S>,
  region: Region,
}

impl<S: BankHolidaySource> WorkingDayCalculator<S> {
  /// Calculator for England and Wales.
  pub fn new(holidays: CachedBankHolidays<S>) -> Self {
    Self {
      holidays,
      region: Region::EnglandAndWales,
    }
  }

  /// Use another jurisdiction's bank holidays.
  pub fn with_region(mut self, region: Region) -> Self {
    self.region = region;
    self
  }

  pub fn region(&self) -> Region {
    self.region
  }

  async fn holiday_dates(&self) -> Result<HashSet<NaiveDate>, WorkingDayError> {
    let calendar = self.holidays.get_bank_holidays().await?;
    Ok(calendar.holiday_dates(self.region))
  }

  pub async fn is_working_day(&self, date: NaiveDate) -> Result<bool, WorkingDayError> {
    let holidays = self.holiday_dates().await?;
    Ok(is_working_day_in(date, &holidays))
  }

  /// The date `number_of_days` working days after `from_date`.
  ///
  /// Each step advances at least one calendar day, so a non-working
  /// `from_date` is never returned for a positive count.
  pub async fn next_working_day_n_days_from_date(
    &self,
    number_of_days: i64,
    from_date: NaiveDate,
  ) -> Result<NaiveDate, WorkingDayError> {
    let steps = u32::try_from(number_of_days)
      .map_err(|_| WorkingDayError::InvalidNumberOfDays(number_of_days))?;

    if steps == 0 {
      return Ok(from_date);
    }

    let holidays = self.holiday_dates().await?;
    add_working_days(from_date, steps, &holidays).ok_or(WorkingDayError::DateOutOfRange(from_date))
  }

  /// Same as [`Self::next_working_day_n_days_from_date`] starting from today's local date.
  pub async fn next_working_day_n_days_from_today(
    &self,
    number_of_days: i64,
  ) -> Result<NaiveDate, WorkingDayError> {
    let today = Local::now().date_naive();
    self
      .next_working_day_n_days_from_date(number_of_days, today)
      .await
  }
}

impl<S> Clone for WorkingDayCalculator<S> {
  fn clone(&self) -> Self {
    Self {
      holidays: self.holidays.clone(),
      region: self.region,
    }
  }
}
