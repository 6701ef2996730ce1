use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `bank_holidays.url`.
pub const API_URL_ENV: &str = "SAN_BANK_HOLIDAYS_API_URL";

/// Largest `cache_ttl_secs` that still fits a `chrono::Duration`.
pub const MAX_CACHE_TTL_SECS: u64 = (i64::MAX / 1000) as u64;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub bank_holidays: BankHolidaysConfig,
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BankHolidaysConfig {
  /// Base URL of the bank holidays feed; `/bank-holidays.json` is appended
  pub url: String,
  /// Timeout for fetching the calendar
  pub timeout_secs: u64,
  /// Shorter timeout used by the upstream health check
  pub health_timeout_secs: u64,
  /// How long a fetched calendar is served before it is refetched
  pub cache_ttl_secs: u64,
}

impl Default for BankHolidaysConfig {
  fn default() -> Self {
    Self {
      url: "https://www.gov.uk".to_string(),
      timeout_secs: 30,
      health_timeout_secs: 2,
      cache_ttl_secs: 24 * 60 * 60,
    }
  }
}

impl BankHolidaysConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  pub fn health_timeout(&self) -> Duration {
    Duration::from_secs(self.health_timeout_secs)
  }

  pub fn cache_ttl(&self) -> Result<chrono::Duration> {
    i64::try_from(self.cache_ttl_secs)
      .ok()
      .and_then(chrono::Duration::try_seconds)
      .ok_or_else(|| {
        eyre!(
          "bank_holidays.cache_ttl_secs must be at most {}, got {}",
          MAX_CACHE_TTL_SECS,
          self.cache_ttl_secs
        )
      })
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Default filter directive when RUST_LOG is unset
  pub level: String,
  /// Write logs to this file instead of stderr
  pub file: Option<PathBuf>,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
      file: None,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./san-working-days.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/san-working-days/config.yaml
  ///
  /// Built-in defaults are used when no file is found. The API URL can be
  /// overridden with `SAN_BANK_HOLIDAYS_API_URL`.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
      config.bank_holidays.url = url;
    }

    config.validate()?;
    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("san-working-days.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("san-working-days").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    url::Url::parse(&self.bank_holidays.url)
      .map_err(|e| eyre!("Invalid bank holidays url '{}': {}", self.bank_holidays.url, e))?;

    if self.bank_holidays.timeout_secs == 0 {
      return Err(eyre!("bank_holidays.timeout_secs must be greater than zero"));
    }
    if self.bank_holidays.health_timeout_secs == 0 {
      return Err(eyre!(
        "bank_holidays.health_timeout_secs must be greater than zero"
      ));
    }
    if self.bank_holidays.cache_ttl_secs > MAX_CACHE_TTL_SECS {
      return Err(eyre!(
        "bank_holidays.cache_ttl_secs must be at most {}, got {}",
        MAX_CACHE_TTL_SECS,
        self.bank_holidays.cache_ttl_secs
      ));
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_yaml_uses_defaults() {
    let config = Config::from_yaml("{}").unwrap();

    assert_eq!(config.bank_holidays.url, "https://www.gov.uk");
    assert_eq!(config.bank_holidays.timeout(), Duration::from_secs(30));
    assert_eq!(config.bank_holidays.health_timeout(), Duration::from_secs(2));
    assert_eq!(
      config.bank_holidays.cache_ttl().unwrap(),
      chrono::Duration::days(1)
    );
    assert_eq!(config.log.level, "info");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_partial_yaml_overrides_fields() {
    let config = Config::from_yaml(
      "bank_holidays:\n  url: http://localhost:8080\n  cache_ttl_secs: 60\nlog:\n  file: /tmp/san.log\n",
    )
    .unwrap();

    assert_eq!(config.bank_holidays.url, "http://localhost:8080");
    assert_eq!(config.bank_holidays.cache_ttl_secs, 60);
    assert_eq!(config.bank_holidays.timeout_secs, 30);
    assert_eq!(config.log.file, Some(PathBuf::from("/tmp/san.log")));
  }

  #[test]
  fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.bank_holidays.url = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.bank_holidays.timeout_secs = 0;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_oversized_cache_ttl_is_rejected() {
    let config = Config::from_yaml("bank_holidays:\n  cache_ttl_secs: 10000000000000000\n").unwrap();
    assert!(config.validate().is_err());
    assert!(config.bank_holidays.cache_ttl().is_err());

    // Would wrap to a negative TTL with a plain cast
    let config =
      Config::from_yaml("bank_holidays:\n  cache_ttl_secs: 18446744073709551615\n").unwrap();
    assert!(config.validate().is_err());
    assert!(config.bank_holidays.cache_ttl().is_err());
  }

  #[test]
  fn test_largest_cache_ttl_is_accepted() {
    let mut config = Config::default();
    config.bank_holidays.cache_ttl_secs = MAX_CACHE_TTL_SECS;

    assert!(config.validate().is_ok());
    assert_eq!(
      config.bank_holidays.cache_ttl().unwrap(),
      chrono::Duration::seconds(MAX_CACHE_TTL_SECS as i64)
    );
  }

  #[test]
  fn test_missing_explicit_path_is_an_error() {
    let result = Config::load(Some(Path::new("/nonexistent/san-working-days.yaml")));
    assert!(result.is_err());
  }
}
