//! Input sources (scrapers and data APIs).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

use super::{Config, SecretFields};

/// Kind of data an input source provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    EconomicCalendar,
    TradingSignals,
    MarketNews,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::EconomicCalendar => "economic_calendar",
            SourceType::TradingSignals => "trading_signals",
            SourceType::MarketNews => "market_news",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "economic_calendar" => Ok(SourceType::EconomicCalendar),
            "trading_signals" => Ok(SourceType::TradingSignals),
            "market_news" => Ok(SourceType::MarketNews),
            _ => Err(InvalidInputError::Other {
                message: format!(
                    "unknown source type '{}' (expected economic_calendar, trading_signals or market_news)",
                    s
                ),
            }),
        }
    }
}

/// How a source is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMethod {
    Api,
    Scraping,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchMethod::Api => "api",
            FetchMethod::Scraping => "scraping",
        })
    }
}

impl FromStr for FetchMethod {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Ok(FetchMethod::Api),
            "scraping" => Ok(FetchMethod::Scraping),
            _ => Err(InvalidInputError::Other {
                message: format!("unknown fetch method '{}' (expected api or scraping)", s),
            }),
        }
    }
}

/// A configured input source as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSource {
    pub id: u64,
    pub name: String,
    pub source_type: SourceType,
    pub method: FetchMethod,
    pub endpoint_url: String,
    #[serde(default)]
    pub credentials: SecretFields,
    #[serde(default)]
    pub config: Config,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateInputSource {
    pub name: String,
    pub source_type: SourceType,
    pub method: FetchMethod,
    pub endpoint_url: String,
    pub credentials: SecretFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of a partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputSourcePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<FetchMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl InputSourcePatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Active sources, optionally restricted to one source type.
pub fn active_input_sources(
    sources: &[InputSource],
    source_type: Option<SourceType>,
) -> Vec<&InputSource> {
    sources
        .iter()
        .filter(|s| s.is_active)
        .filter(|s| source_type.is_none_or(|t| s.source_type == t))
        .collect()
}
