//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_PROGRESS_REFRESH_SECS, DASHBOARD_REFRESH_SECS};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub tenant: TenantConfig,
    pub refresh: RefreshConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Tenant (institution) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub tenant_id: String,
    pub institution_name: String,
}

/// Dashboard refresh cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub dashboard_interval_secs: u64,
    pub class_progress_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.horario.app/v1".to_string(),
                timeout_secs: 30,
            },
            tenant: TenantConfig {
                tenant_id: "ueipab".to_string(),
                institution_name: "U.E.I.P. Antonio Bello".to_string(),
            },
            refresh: RefreshConfig {
                dashboard_interval_secs: DASHBOARD_REFRESH_SECS,
                class_progress_interval_secs: CLASS_PROGRESS_REFRESH_SECS,
            },
        }
    }
}
