use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;

use crate::relay::BranchDestinations;

const DEFAULT_WHATSAPP: &str = "5545999111741";
const DEFAULT_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Server configuration
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Directory holding the redb file |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_JSON | false | JSON log output |
/// | LOG_DIR | (unset) | Rolling log file directory |
/// | BUSINESS_TZ | America/Sao_Paulo | Day bucketing for metrics |
/// | WHATSAPP_MARECHAL | 5545999111741 | Marechal branch destination |
/// | WHATSAPP_FOZ | 5545999111741 | Foz branch destination |
/// | RELAY_WEBHOOK_URL | (unset) | Use the webhook relay instead of links |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout |
///
/// ```ignore
/// WORK_DIR=/srv/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Holds `storefront.redb`
    pub work_dir: String,
    pub http_port: u16,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Time zone used to cut calendar days
    pub business_tz: Tz,
    pub destinations: BranchDestinations,
    pub relay_webhook_url: Option<String>,
    pub request_timeout_ms: u64,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let business_tz = match env_opt("BUSINESS_TZ") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                tracing::warn!(tz = %name, "Unknown BUSINESS_TZ, using America/Sao_Paulo");
                DEFAULT_TZ
            }),
            None => DEFAULT_TZ,
        };

        Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: env_parse("HTTP_PORT", 3000),
            environment: env_or("ENVIRONMENT", "development"),
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: env_opt("LOG_DIR"),
            business_tz,
            destinations: BranchDestinations {
                marechal_candido_rondon: env_or("WHATSAPP_MARECHAL", DEFAULT_WHATSAPP),
                foz_do_iguacu: env_or("WHATSAPP_FOZ", DEFAULT_WHATSAPP),
            },
            relay_webhook_url: env_opt("RELAY_WEBHOOK_URL"),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
        }
    }

    /// Override work dir and port
    ///
    /// Mostly for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("storefront.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_paths() {
        let config = Config::with_overrides("/tmp/storefront-test", 4100);
        assert_eq!(config.http_port, 4100);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/storefront-test/storefront.redb")
        );
    }

    #[test]
    fn test_env_parse_falls_back() {
        assert_eq!(env_parse("STOREFRONT_TEST_UNSET_PORT", 3000u16), 3000);
        assert_eq!(env_opt("STOREFRONT_TEST_UNSET_URL"), None);
    }
}
