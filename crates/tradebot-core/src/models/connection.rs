//! Connection test results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Config;

/// Outcome of a backend-side connection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Success,
    Failed,
    NotSupported,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectionStatus::Success => "success",
            ConnectionStatus::Failed => "failed",
            ConnectionStatus::NotSupported => "not_supported",
        })
    }
}

/// Response of a `test_connection` call on a source or destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub status: ConnectionStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Config>,
}

impl ConnectionTestResult {
    pub fn is_success(&self) -> bool {
        self.status == ConnectionStatus::Success
    }
}
