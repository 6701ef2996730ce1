use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Jurisdiction a bank holiday list is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
  #[default]
  EnglandAndWales,
  Scotland,
  NorthernIreland,
}

impl Region {
  pub const ALL: [Region; 3] = [
    Region::EnglandAndWales,
    Region::Scotland,
    Region::NorthernIreland,
  ];

  /// Name used by the upstream feed.
  pub fn as_str(&self) -> &'static str {
    match self {
      Region::EnglandAndWales => "england-and-wales",
      Region::Scotland => "scotland",
      Region::NorthernIreland => "northern-ireland",
    }
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Region {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace('_', "-");
    Region::ALL
      .into_iter()
      .find(|region| region.as_str() == normalized)
      .ok_or_else(|| {
        format!(
          "unknown region '{}', expected one of: england-and-wales, scotland, northern-ireland",
          s
        )
      })
  }
}

/// One published bank holiday. Only `date` takes part in working-day logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayEvent {
  pub title: String,
  pub date: NaiveDate,
  pub notes: String,
  pub bunting: bool,
}

/// The full published calendar, one event list per jurisdiction, kept in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankHolidayCalendar {
  pub england_and_wales: Vec<HolidayEvent>,
  pub scotland: Vec<HolidayEvent>,
  pub northern_ireland: Vec<HolidayEvent>,
}

impl BankHolidayCalendar {
  pub fn events(&self, region: Region) -> &[HolidayEvent] {
    match region {
      Region::EnglandAndWales => &self.england_and_wales,
      Region::Scotland => &self.scotland,
      Region::NorthernIreland => &self.northern_ireland,
    }
  }

  pub fn holiday_dates(&self, region: Region) -> HashSet<NaiveDate> {
    self.events(region).iter().map(|event| event.date).collect()
  }

  pub fn is_bank_holiday(&self, region: Region, date: NaiveDate) -> bool {
    self.events(region).iter().any(|event| event.date == date)
  }

  pub fn events_in_year(&self, region: Region, year: i32) -> impl Iterator<Item = &HolidayEvent> {
    self
      .events(region)
      .iter()
      .filter(move |event| event.date.year() == year)
  }
}
