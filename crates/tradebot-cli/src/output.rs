//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;

use tradebot_core::models::ConnectionTestResult;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the outcome of a connection test.
pub fn connection_result(result: &ConnectionTestResult) -> Result<()> {
    if result.is_success() {
        success(&result.message);
    } else {
        error(&result.message);
    }
    field("Status", &result.status.to_string());
    if let Some(details) = &result.details {
        json_pretty(details)?;
    }
    Ok(())
}

/// Marker for a record's active flag in table rows.
pub fn active_marker(is_active: bool) -> ColoredString {
    if is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    }
}

/// Short timestamp for table rows.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_minute_precision() {
        let at: DateTime<Utc> = "2025-01-15T10:30:59Z".parse().unwrap();
        assert_eq!(timestamp(&at), "2025-01-15 10:30");
    }
}
