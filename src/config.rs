//! Runtime configuration loaded from the environment.
//!
//! Required secrets fail fast at startup; everything else has a default
//! matching the shop's production setup.

use anyhow::{ensure, Context, Result};
use log::info;
use std::env;

/// One barber in the shop's fixed enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct Barber {
    /// Stable identifier used in callback data, e.g. `barber_1`.
    pub id: String,
    /// Display name shown to customers.
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub admin_password: String,
    pub spreadsheet_id: String,
    pub sheets_api_token: String,
    pub sheet_name: String,
    /// Numeric grid id of the sheet tab, needed for row deletion.
    pub sheet_gid: u64,
    pub barbers: Vec<Barber>,
    /// Per-customer service duration used by the wait-time estimator.
    pub appointment_minutes: i64,
    /// Notification scheduler tick interval.
    pub notify_interval_secs: u64,
    /// Minimum elapsed time before the same tier fires again for a customer.
    pub notify_cooldown_secs: u64,
    /// TTL of the row-store read cache.
    pub sheets_cache_ttl_secs: u64,
}

const DEFAULT_BARBERS: &str = "حلاق 1,حلاق 2,حلاق 3";

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;
        let admin_password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
        let spreadsheet_id = env::var("SPREADSHEET_ID").context("SPREADSHEET_ID must be set")?;
        let sheets_api_token =
            env::var("SHEETS_API_TOKEN").context("SHEETS_API_TOKEN must be set")?;

        let sheet_name = env::var("SHEET_NAME").unwrap_or_else(|_| "Sheet1".to_string());
        let sheet_gid = parse_var("SHEET_GID", 0u64)?;

        let barbers_raw = env::var("BARBERS").unwrap_or_else(|_| DEFAULT_BARBERS.to_string());
        let barbers = parse_barbers(&barbers_raw)?;

        let config = Config {
            bot_token,
            admin_password,
            spreadsheet_id,
            sheets_api_token,
            sheet_name,
            sheet_gid,
            barbers,
            appointment_minutes: parse_var("APPOINTMENT_MINUTES", 10i64)?,
            notify_interval_secs: parse_var("NOTIFY_INTERVAL_SECS", 60u64)?,
            notify_cooldown_secs: parse_var("NOTIFY_COOLDOWN_SECS", 300u64)?,
            sheets_cache_ttl_secs: parse_var("SHEETS_CACHE_TTL_SECS", 15u64)?,
        };

        ensure!(
            config.appointment_minutes > 0,
            "APPOINTMENT_MINUTES must be positive"
        );
        ensure!(
            config.notify_interval_secs > 0,
            "NOTIFY_INTERVAL_SECS must be positive"
        );

        info!(
            "Configuration loaded: {} barbers, {}-minute appointments",
            config.barbers.len(),
            config.appointment_minutes
        );

        Ok(config)
    }

    /// Look up a barber by its callback identifier.
    pub fn barber_by_id(&self, id: &str) -> Option<&Barber> {
        self.barbers.iter().find(|b| b.id == id)
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Parse the comma-separated barber list into the fixed enumeration.
pub fn parse_barbers(raw: &str) -> Result<Vec<Barber>> {
    let barbers: Vec<Barber> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(i, name)| Barber {
            id: format!("barber_{}", i + 1),
            name: name.to_string(),
        })
        .collect();

    ensure!(!barbers.is_empty(), "BARBERS must name at least one barber");
    Ok(barbers)
}
