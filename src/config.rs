use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings, layered as built-in defaults, then an optional
/// `storefront.toml`, then `STOREFRONT__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub service_name: String,
    pub log: LogConfig,
    pub actors: ActorConfig,
    pub pagination: PaginationConfig,
    pub dashboard: DashboardConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    /// Mailbox capacity of every resource actor.
    pub buffer_size: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DashboardConfig {
    pub recent_orders: usize,
    /// Products with stock strictly below this are reported as low stock.
    pub low_stock_threshold: u32,
    pub low_stock_limit: usize,
    pub sales_window_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

const ENV_PREFIX: &str = "STOREFRONT";

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("storefront").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("service_name", "storefront-admin")?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?
            .set_default("actors.buffer_size", 32_i64)?
            .set_default("pagination.default_limit", 20_i64)?
            .set_default("pagination.max_limit", 100_i64)?
            .set_default("dashboard.recent_orders", 10_i64)?
            .set_default("dashboard.low_stock_threshold", 10_i64)?
            .set_default("dashboard.low_stock_limit", 10_i64)?
            .set_default("dashboard.sales_window_days", 7_i64)?
            .set_default("storage.bucket", "products")?
            .set_default("storage.public_base_url", "memory://products")?
            .set_default("storage.max_upload_bytes", 5_i64 * 1024 * 1024)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "storefront-admin".to_string(),
            log: LogConfig {
                level: "info".to_string(),
                json: false,
            },
            actors: ActorConfig { buffer_size: 32 },
            pagination: PaginationConfig {
                default_limit: 20,
                max_limit: 100,
            },
            dashboard: DashboardConfig {
                recent_orders: 10,
                low_stock_threshold: 10,
                low_stock_limit: 10,
                sales_window_days: 7,
            },
            storage: StorageConfig {
                bucket: "products".to_string(),
                public_base_url: "memory://products".to_string(),
                max_upload_bytes: 5 * 1024 * 1024,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults_match_default_impl() {
        let loaded: AppConfig = AppConfig::builder().unwrap().build().unwrap().try_deserialize().unwrap();
        let expected = AppConfig::default();

        assert_eq!(loaded.service_name, expected.service_name);
        assert_eq!(loaded.pagination.max_limit, 100);
        assert_eq!(loaded.pagination.default_limit, 20);
        assert_eq!(loaded.dashboard.sales_window_days, 7);
        assert_eq!(loaded.dashboard.low_stock_threshold, 10);
        assert_eq!(loaded.storage.max_upload_bytes, expected.storage.max_upload_bytes);
        assert!(!loaded.log.json);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let loaded: AppConfig = AppConfig::builder()
            .unwrap()
            .set_override("pagination.max_limit", 50_i64)
            .unwrap()
            .set_override("log.json", true)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(loaded.pagination.max_limit, 50);
        assert!(loaded.log.json);
    }
}
