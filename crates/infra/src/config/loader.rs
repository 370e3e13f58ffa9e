//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from a TOML file
//! 3. Probes a few conventional paths for the config file
//!
//! ## Environment Variables
//! - `HORARIO_API_BASE_URL`: Backend API root
//! - `HORARIO_TENANT_ID`: Tenant identifier
//! - `HORARIO_INSTITUTION_NAME`: Institution display name (optional)
//! - `HORARIO_API_TIMEOUT_SECS`: Request timeout in seconds (optional)
//! - `HORARIO_DASHBOARD_INTERVAL_SECS`: Dashboard refresh interval (optional)
//! - `HORARIO_PROGRESS_INTERVAL_SECS`: Class progress refresh interval (optional)
//!
//! ## File Locations
//! The loader probes, in order: `./horario.toml`, `./config.toml`,
//! `../horario.toml`.

use std::path::{Path, PathBuf};

use horario_domain::{Config, HorarioError, Result};
use tracing::{debug, info};

const FILE_CANDIDATES: [&str; 3] = ["horario.toml", "config.toml", "../horario.toml"];

/// Load configuration with automatic fallback strategy.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(err) => {
            debug!(error = ?err, "environment configuration incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables.
///
/// `HORARIO_API_BASE_URL` and `HORARIO_TENANT_ID` are required; everything
/// else falls back to defaults.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("HORARIO_API_BASE_URL")?;
    let tenant_id = env_var("HORARIO_TENANT_ID")?;

    let mut config = Config::default();
    config.api.base_url = base_url;
    config.tenant.tenant_id = tenant_id;

    if let Ok(name) = std::env::var("HORARIO_INSTITUTION_NAME") {
        config.tenant.institution_name = name;
    }
    if let Some(timeout) = env_u64("HORARIO_API_TIMEOUT_SECS")? {
        config.api.timeout_secs = timeout;
    }
    if let Some(interval) = env_u64("HORARIO_DASHBOARD_INTERVAL_SECS")? {
        config.refresh.dashboard_interval_secs = interval.max(1);
    }
    if let Some(interval) = env_u64("HORARIO_PROGRESS_INTERVAL_SECS")? {
        config.refresh.class_progress_interval_secs = interval.max(1);
    }

    Ok(config)
}

/// Load configuration from a TOML file. With no explicit path, probes the
/// conventional locations.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_file().ok_or_else(|| {
            HorarioError::Config(
                "no configuration found: set HORARIO_API_BASE_URL/HORARIO_TENANT_ID or provide horario.toml".to_string(),
            )
        })?,
    };

    let raw = std::fs::read_to_string(&path).map_err(|err| {
        HorarioError::Config(format!("cannot read {}: {err}", path.display()))
    })?;

    let config: Config = toml::from_str(&raw).map_err(|err| {
        HorarioError::Config(format!("invalid config file {}: {err}", path.display()))
    })?;

    info!(path = %path.display(), "configuration loaded from file");
    Ok(config)
}

fn probe_config_file() -> Option<PathBuf> {
    FILE_CANDIDATES.iter().map(PathBuf::from).find(|p| p.is_file())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| HorarioError::Config(format!("missing environment variable {name}")))
}

fn env_u64(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|err| HorarioError::Config(format!("invalid {name}: {err}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("horario.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[api]
base_url = "https://backend.ueipab.edu.ve/api"
timeout_secs = 10

[tenant]
tenant_id = "ueipab"
institution_name = "U.E.I.P. Antonio Bello"

[refresh]
dashboard_interval_secs = 30
class_progress_interval_secs = 5
"#
        )
        .unwrap();

        let config = load_from_file(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://backend.ueipab.edu.ve/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.tenant.tenant_id, "ueipab");
        assert_eq!(config.refresh.dashboard_interval_secs, 30);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("horario.toml");
        std::fs::write(&path, "api = 'not a table'").unwrap();

        let err = load_from_file(Some(&path)).unwrap_err();
        assert!(matches!(err, HorarioError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_from_file(Some(Path::new("/nonexistent/horario.toml"))).unwrap_err();
        assert!(matches!(err, HorarioError::Config(_)));
    }
}
