//! Serde-deserializable types matching the bank holidays feed.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use chrono::NaiveDate;
use serde::Deserialize;

use super::types::{BankHolidayCalendar, HolidayEvent};

#[derive(Debug, Deserialize)]
pub struct ApiBankHolidaysResponse {
  #[serde(rename = "england-and-wales")]
  pub england_and_wales: ApiDivision,
  pub scotland: ApiDivision,
  #[serde(rename = "northern-ireland")]
  pub northern_ireland: ApiDivision,
}

#[derive(Debug, Deserialize)]
pub struct ApiDivision {
  pub events: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
pub struct ApiEvent {
  pub title: String,
  pub date: NaiveDate,
  #[serde(default)]
  pub notes: String,
  #[serde(default)]
  pub bunting: bool,
}

impl From<ApiEvent> for HolidayEvent {
  fn from(event: ApiEvent) -> Self {
    HolidayEvent {
      title: event.title,
      date: event.date,
      notes: event.notes,
      bunting: event.bunting,
    }
  }
}

impl ApiDivision {
  fn into_events(self) -> Vec<HolidayEvent> {
    self.events.into_iter().map(HolidayEvent::from).collect()
  }
}

impl From<ApiBankHolidaysResponse> for BankHolidayCalendar {
  fn from(response: ApiBankHolidaysResponse) -> Self {
    BankHolidayCalendar {
      england_and_wales: response.england_and_wales.into_events(),
      scotland: response.scotland.into_events(),
      northern_ireland: response.northern_ireland.into_events(),
    }
  }
}
