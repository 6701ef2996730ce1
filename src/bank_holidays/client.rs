use crate::config::BankHolidaysConfig;
use crate::error::FetchError;
use color_eyre::{eyre::eyre, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use super::api_types::ApiBankHolidaysResponse;
use super::types::BankHolidayCalendar;

const BANK_HOLIDAYS_PATH: &str = "/bank-holidays.json";

/// Anything that can produce the full bank holiday calendar.
pub trait BankHolidaySource: Send + Sync {
  fn fetch_bank_holidays(
    &self,
  ) -> impl Future<Output = Result<BankHolidayCalendar, FetchError>> + Send;
}

/// HTTP client for the published bank holidays feed
#[derive(Clone)]
pub struct BankHolidaysClient {
  client: reqwest::Client,
  health_client: reqwest::Client,
  endpoint: String,
}

impl BankHolidaysClient {
  pub fn new(config: &BankHolidaysConfig) -> Result<Self> {
    let client = build_http_client(config.timeout())?;
    let health_client = build_http_client(config.health_timeout())?;
    let endpoint = format!(
      "{}{}",
      config.url.trim_end_matches('/'),
      BANK_HOLIDAYS_PATH
    );

    Ok(Self {
      client,
      health_client,
      endpoint,
    })
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Fetch and parse the full calendar
  pub async fn get_bank_holidays(&self) -> Result<BankHolidayCalendar, FetchError> {
    info!(url = %self.endpoint, "fetching bank holidays");

    let body = self.get(&self.client).await?;
    let response: ApiBankHolidaysResponse = serde_json::from_slice(&body).map_err(|e| {
      warn!(url = %self.endpoint, error = %e, "bank holidays payload did not parse");
      FetchError::from(e)
    })?;

    Ok(response.into())
  }

  /// Check the feed answers with a success status within the health timeout
  pub async fn health_check(&self) -> Result<(), FetchError> {
    self.get(&self.health_client).await.map(|_| ())
  }

  async fn get(&self, client: &reqwest::Client) -> Result<Vec<u8>, FetchError> {
    let transport = |source: reqwest::Error| {
      warn!(url = %self.endpoint, error = %source, "bank holidays request failed");
      FetchError::Transport {
        url: self.endpoint.clone(),
        source,
      }
    };

    let response = client
      .get(&self.endpoint)
      .send()
      .await
      .map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
      warn!(url = %self.endpoint, %status, "bank holidays request rejected");
      return Err(FetchError::Status {
        url: self.endpoint.clone(),
        status: status.as_u16(),
      });
    }

    let body = response.bytes().await.map_err(transport)?;
    Ok(body.to_vec())
  }
}

impl BankHolidaySource for BankHolidaysClient {
  async fn fetch_bank_holidays(&self) -> Result<BankHolidayCalendar, FetchError> {
    self.get_bank_holidays().await
  }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
  reqwest::Client::builder()
    .timeout(timeout)
    .build()
    .map_err(|e| eyre!("Failed to create HTTP client: {}", e))
}
