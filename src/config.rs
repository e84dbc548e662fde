use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};

/// Application-level constants
pub const APP_NAME: &str = "CarePulse";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the portal server.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default static asset directory, relative to the working directory.
pub const DEFAULT_ASSETS_DIR: &str = "public/assets";

/// Largest accepted display offset: one minute short of a day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "carepulse=info,carepulse_lib=info,tower_http=warn"
}

/// Fatal configuration problems. Any of these halts startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

// ═══════════════════════════════════════════════════════════
// Backend credentials and resource identifiers
// ═══════════════════════════════════════════════════════════

/// Connection settings for the managed backend.
///
/// `endpoint`, `project_id` and `api_key` are mandatory. The collection
/// and bucket identifiers are optional at startup; an operation that needs
/// one that was not configured fails with `BackendError::MissingCollection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: Option<String>,
    pub patient_collection_id: Option<String>,
    pub doctor_collection_id: Option<String>,
    pub appointment_collection_id: Option<String>,
    pub bucket_id: Option<String>,
}

impl BackendConfig {
    pub const ENDPOINT_VAR: &'static str = "APPWRITE_ENDPOINT";
    pub const PROJECT_VAR: &'static str = "APPWRITE_PROJECT_ID";
    pub const API_KEY_VAR: &'static str = "APPWRITE_API_KEY";
    pub const DATABASE_VAR: &'static str = "DATABASE_ID";
    pub const PATIENT_COLLECTION_VAR: &'static str = "PATIENT_COLLECTION_ID";
    pub const DOCTOR_COLLECTION_VAR: &'static str = "DOCTOR_COLLECTION_ID";
    pub const APPOINTMENT_COLLECTION_VAR: &'static str = "APPOINTMENT_COLLECTION_ID";
    pub const BUCKET_VAR: &'static str = "BUCKET_ID";

    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            endpoint: require(Self::ENDPOINT_VAR)?,
            project_id: require(Self::PROJECT_VAR)?,
            api_key: require(Self::API_KEY_VAR)?,
            database_id: get(Self::DATABASE_VAR),
            patient_collection_id: get(Self::PATIENT_COLLECTION_VAR),
            doctor_collection_id: get(Self::DOCTOR_COLLECTION_VAR),
            appointment_collection_id: get(Self::APPOINTMENT_COLLECTION_VAR),
            bucket_id: get(Self::BUCKET_VAR),
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Portal configuration
// ═══════════════════════════════════════════════════════════

/// Everything the portal needs at startup, validated once.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub backend: BackendConfig,
    pub addr: SocketAddr,
    pub assets_dir: PathBuf,
    /// Offset used when formatting appointment times for display.
    pub display_offset: FixedOffset,
}

impl PortalConfig {
    pub const ADDR_VAR: &'static str = "PORTAL_ADDR";
    pub const ASSETS_VAR: &'static str = "PORTAL_ASSETS_DIR";
    pub const OFFSET_VAR: &'static str = "DISPLAY_UTC_OFFSET_MINUTES";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = BackendConfig::from_lookup(&lookup)?;
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_raw = get(Self::ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: Self::ADDR_VAR,
                reason: e.to_string(),
            })?;

        let assets_dir = get(Self::ASSETS_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));

        let display_offset = match get(Self::OFFSET_VAR) {
            Some(raw) => parse_offset_minutes(&raw)?,
            None => utc(),
        };

        Ok(Self {
            backend,
            addr,
            assets_dir,
            display_offset,
        })
    }
}

fn parse_offset_minutes(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: PortalConfig::OFFSET_VAR,
        reason,
    };

    let minutes: i32 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;

    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(invalid(format!(
            "{minutes} is outside ±{MAX_OFFSET_MINUTES} minutes"
        )));
    }

    FixedOffset::east_opt(minutes * 60).ok_or_else(|| invalid(format!("{minutes} minutes")))
}

/// UTC as a `FixedOffset`.
pub fn utc() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn credentials() -> Vec<(&'static str, &'static str)> {
        vec![
            ("APPWRITE_ENDPOINT", "https://cloud.appwrite.io/v1"),
            ("APPWRITE_PROJECT_ID", "carepulse"),
            ("APPWRITE_API_KEY", "secret-key"),
        ]
    }

    #[test]
    fn backend_config_reads_all_values() {
        let mut pairs = credentials();
        pairs.push(("DATABASE_ID", "db"));
        pairs.push(("APPOINTMENT_COLLECTION_ID", "appointments"));
        let config = BackendConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.project_id, "carepulse");
        assert_eq!(config.database_id.as_deref(), Some("db"));
        assert_eq!(config.appointment_collection_id.as_deref(), Some("appointments"));
        assert!(config.patient_collection_id.is_none());
        assert!(config.bucket_id.is_none());
    }

    #[test]
    fn each_missing_credential_is_fatal() {
        for missing in ["APPWRITE_ENDPOINT", "APPWRITE_PROJECT_ID", "APPWRITE_API_KEY"] {
            let pairs: Vec<_> = credentials()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = BackendConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(missing));
        }
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let mut pairs = credentials();
        pairs.retain(|(k, _)| *k != "APPWRITE_API_KEY");
        pairs.push(("APPWRITE_API_KEY", "   "));
        let err = BackendConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("APPWRITE_API_KEY"));
    }

    #[test]
    fn portal_config_defaults() {
        let config = PortalConfig::from_lookup(lookup_from(&credentials())).unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
        assert_eq!(config.display_offset.local_minus_utc(), 0);
    }

    #[test]
    fn portal_config_reads_offset_and_addr() {
        let mut pairs = credentials();
        pairs.push(("PORTAL_ADDR", "0.0.0.0:8080"));
        pairs.push(("DISPLAY_UTC_OFFSET_MINUTES", "-300"));
        let config = PortalConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.display_offset.local_minus_utc(), -300 * 60);
    }

    #[test]
    fn portal_config_rejects_bad_offset() {
        let mut pairs = credentials();
        pairs.push(("DISPLAY_UTC_OFFSET_MINUTES", "1440"));
        let err = PortalConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DISPLAY_UTC_OFFSET_MINUTES", .. }));

        let mut pairs = credentials();
        pairs.push(("DISPLAY_UTC_OFFSET_MINUTES", "east"));
        assert!(PortalConfig::from_lookup(lookup_from(&pairs)).is_err());
    }

    #[test]
    fn offset_range_is_checked_without_overflow() {
        assert!(parse_offset_minutes("1439").is_ok());
        assert!(parse_offset_minutes("-1439").is_ok());
        for raw in ["-2147483648", "2147483647", "-1440"] {
            let err = parse_offset_minutes(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: "DISPLAY_UTC_OFFSET_MINUTES", .. }),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn portal_config_rejects_bad_addr() {
        let mut pairs = credentials();
        pairs.push(("PORTAL_ADDR", "localhost"));
        let err = PortalConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORTAL_ADDR", .. }));
    }

    #[test]
    fn portal_config_requires_backend_credentials() {
        let err = PortalConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("APPWRITE_ENDPOINT"));
    }

    #[test]
    fn app_name_is_carepulse() {
        assert_eq!(APP_NAME, "CarePulse");
    }
}
