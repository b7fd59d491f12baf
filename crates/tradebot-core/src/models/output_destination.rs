//! Output destinations (posting accounts).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

use super::{Config, SecretFields};

/// Social platform a destination posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Telegram,
    Twitter,
    Discord,
    Whatsapp,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Telegram => "telegram",
            Platform::Twitter => "twitter",
            Platform::Discord => "discord",
            Platform::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "telegram" => Ok(Platform::Telegram),
            "twitter" | "x" => Ok(Platform::Twitter),
            "discord" => Ok(Platform::Discord),
            "whatsapp" => Ok(Platform::Whatsapp),
            _ => Err(InvalidInputError::Other {
                message: format!(
                    "unknown platform '{}' (expected telegram, twitter, discord or whatsapp)",
                    s
                ),
            }),
        }
    }
}

/// A configured output destination as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDestination {
    pub id: u64,
    pub platform: Platform,
    pub label: String,
    pub account_id: String,
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
pub struct CreateOutputDestination {
    pub platform: Platform,
    pub label: String,
    pub account_id: String,
    pub credentials: SecretFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body of a partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputDestinationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl OutputDestinationPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Active destinations, optionally restricted to one platform.
pub fn active_output_destinations(
    destinations: &[OutputDestination],
    platform: Option<Platform>,
) -> Vec<&OutputDestination> {
    destinations
        .iter()
        .filter(|d| d.is_active)
        .filter(|d| platform.is_none_or(|p| d.platform == p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn destination(id: u64, platform: Platform, is_active: bool) -> OutputDestination {
        serde_json::from_value(json!({
            "id": id,
            "platform": platform,
            "label": "FX News Channel",
            "account_id": "@fxnews_channel",
            "credentials": {"bot_token": "1234567890:AAEh"},
            "config": {"parseMode": "HTML"},
            "is_active": is_active,
            "created_at": "2025-01-15T09:30:00Z",
            "updated_at": "2025-01-15T09:30:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn debug_redacts_credentials() {
        let d = destination(1, Platform::Telegram, true);
        let debug = format!("{:?}", d);
        assert!(debug.contains("bot_token"));
        assert!(!debug.contains("1234567890:AAEh"));
    }

    #[test]
    fn platform_parsing() {
        assert_eq!("WhatsApp".parse::<Platform>().unwrap(), Platform::Whatsapp);
        assert_eq!("x".parse::<Platform>().unwrap(), Platform::Twitter);
        assert!("myspace".parse::<Platform>().is_err());
        assert_eq!(serde_json::to_value(Platform::Whatsapp).unwrap(), json!("whatsapp"));
    }

    #[test]
    fn filters_active_by_platform() {
        let destinations = vec![
            destination(1, Platform::Telegram, true),
            destination(2, Platform::Twitter, true),
            destination(3, Platform::Discord, true),
            destination(4, Platform::Whatsapp, false),
        ];

        assert_eq!(active_output_destinations(&destinations, None).len(), 3);
        assert!(active_output_destinations(&destinations, Some(Platform::Whatsapp)).is_empty());

        let discord = active_output_destinations(&destinations, Some(Platform::Discord));
        assert_eq!(discord.len(), 1);
        assert_eq!(discord[0].id, 3);
    }
}
