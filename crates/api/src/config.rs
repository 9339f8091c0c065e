//! Process configuration read once at startup.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Dashboard and site origins allowed to call the API.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the revalidation forwarder to drain.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Public site endpoint that receives stale routes after each write.
    /// Unset disables forwarding.
    pub revalidate_webhook_url: Option<String>,
    /// Read-only licence details shown to administrators.
    pub license: LicenseInfo,
}

/// Licence registration details, all optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LicenseInfo {
    pub serial: Option<String>,
    pub owner_name: Option<String>,
    pub owner_vat: Option<String>,
    pub vendor_name: Option<String>,
    pub vendor_vat: Option<String>,
    pub valid_until: Option<String>,
}

impl LicenseInfo {
    pub fn from_env() -> Self {
        Self {
            serial: non_blank("LICENSE_SERIAL"),
            owner_name: non_blank("LICENSE_OWNER_NAME"),
            owner_vat: non_blank("LICENSE_OWNER_VAT"),
            vendor_name: non_blank("LICENSE_VENDOR_NAME"),
            vendor_vat: non_blank("LICENSE_VENDOR_VAT"),
            valid_until: non_blank("LICENSE_VALIDITY_DATE"),
        }
    }
}

impl ServerConfig {
    /// Read the server settings; everything but the JWT secret has a local
    /// development default.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                    |
    /// | `REVALIDATE_WEBHOOK_URL` | (unset)                 |
    ///
    /// # Panics
    ///
    /// Panics when a numeric variable does not parse.
    pub fn from_env() -> Self {
        Self {
            host: non_blank("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: env_parse("PORT", 3000),
            cors_origins: parse_origins(
                &non_blank("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3001".into()),
            ),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
            revalidate_webhook_url: non_blank("REVALIDATE_WEBHOOK_URL"),
            license: LicenseInfo::from_env(),
        }
    }
}

/// The variable's value, treating blank as unset.
fn non_blank(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match non_blank(key) {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        None => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" https://studio.gr, ,http://localhost:3001 "),
            vec!["https://studio.gr", "http://localhost:3001"]
        );
    }
}
