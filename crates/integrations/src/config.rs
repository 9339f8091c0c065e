//! Vendor credentials loaded from environment variables.
//!
//! Every service is optional: a missing key leaves that client in the
//! "not configured" state and its operations fail with
//! [`IntegrationError::NotConfigured`](crate::error::IntegrationError).

/// Bunny Storage zone credentials and the pull-zone URL assets are served
/// from.
#[derive(Debug, Clone)]
pub struct BunnyConfig {
    pub storage_zone: String,
    /// Storage API host, e.g. `storage.bunnycdn.com`.
    pub storage_endpoint: String,
    pub access_key: String,
    /// Public base URL, e.g. `https://studio.b-cdn.net`.
    pub pull_base_url: String,
}

/// Credentials for every external service.
///
/// | Env Var                    | Default                    |
/// |----------------------------|----------------------------|
/// | `BUNNY_STORAGE_ZONE`       | (unset: storage disabled)  |
/// | `BUNNY_STORAGE_ENDPOINT`   | `storage.bunnycdn.com`     |
/// | `BUNNY_STORAGE_ACCESS_KEY` | (unset: storage disabled)  |
/// | `BUNNY_PULL_BASE_URL`      | (unset: storage disabled)  |
/// | `DEEPSEEK_API_KEY`         | (unset: AI disabled)       |
/// | `DEEPSEEK_BASE_URL`        | `https://api.deepseek.com` |
/// | `CLAID_API_KEY`            | (unset)                    |
/// | `SCREENSHOT_ACCESS_KEY`    | (unset)                    |
#[derive(Debug, Clone, Default)]
pub struct IntegrationsConfig {
    pub bunny: Option<BunnyConfig>,
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,
    pub claid_api_key: Option<String>,
    pub screenshot_access_key: Option<String>,
}

const DEFAULT_BUNNY_ENDPOINT: &str = "storage.bunnycdn.com";
const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

impl IntegrationsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bunny = match (
            get("BUNNY_STORAGE_ZONE"),
            get("BUNNY_STORAGE_ACCESS_KEY"),
            get("BUNNY_PULL_BASE_URL"),
        ) {
            (Some(storage_zone), Some(access_key), Some(pull_base_url)) => Some(BunnyConfig {
                storage_zone,
                storage_endpoint: get("BUNNY_STORAGE_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_BUNNY_ENDPOINT.to_string()),
                access_key,
                pull_base_url,
            }),
            _ => None,
        };

        Self {
            bunny,
            deepseek_api_key: get("DEEPSEEK_API_KEY"),
            deepseek_base_url: get("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DEEPSEEK_BASE_URL.to_string()),
            claid_api_key: get("CLAID_API_KEY"),
            screenshot_access_key: get("SCREENSHOT_ACCESS_KEY"),
        }
    }
}
