use anyhow::Context;
use chrono::Weekday;
use serde::Deserialize;
use std::env;

// Top-level configuration container for the crate.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
}

// Settings for the external booking API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Service API key sent as `X-Noroff-API-Key`. Optional: read-only
    /// endpoints work without it.
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

// Calendar conventions used by the statistics aggregator. The engine never
// reads ambient locale or timezone state; everything date-related flows
// through this struct.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// First day of a revenue week. ISO convention (Monday) by default.
    #[serde(deserialize_with = "week_start::deserialize")]
    pub week_starts_on: Weekday,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Mon,
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables, loading a `.env`
    /// file first when present. Every variable has a default except none —
    /// the crate talks to a public API and needs no mandatory secrets.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            api: ApiConfig {
                base_url: env::var("MARKET_API_BASE_URL")
                    .unwrap_or_else(|_| "https://v2.api.noroff.dev".to_string()),
                api_key: env::var("MARKET_API_KEY").ok().filter(|k| !k.is_empty()),
                timeout_seconds: env::var("MARKET_API_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("MARKET_API_TIMEOUT_SECONDS must be a valid number")?,
            },
            calendar: CalendarConfig {
                week_starts_on: parse_weekday(
                    &env::var("MARKET_WEEK_STARTS_ON").unwrap_or_else(|_| "monday".to_string()),
                )
                .context("MARKET_WEEK_STARTS_ON must be a weekday name")?,
            },
        })
    }
}

fn parse_weekday(value: &str) -> anyhow::Result<Weekday> {
    value
        .parse::<Weekday>()
        .map_err(|_| anyhow::anyhow!("unrecognized weekday: {value}"))
}

// Serde representation of the week-start day as a lowercase weekday name,
// so config files round-trip the same strings the env var accepts.
mod week_start {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Weekday>()
            .map_err(|_| serde::de::Error::custom(format!("unrecognized weekday: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_parse() {
        assert_eq!(parse_weekday("monday").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("sun").unwrap(), Weekday::Sun);
        assert!(parse_weekday("someday").is_err());
    }
}
