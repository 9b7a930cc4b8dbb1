//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: u64,
    pub jwt_refresh_ttl_seconds: u64,
    /// 启动时是否装入演示数据（地域参照、演示账户）。
    pub seed_demo_data: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("OMS_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("OMS_JWT_SECRET".to_string()))?;
        let jwt_access_ttl_seconds = read_u64_with_default("OMS_JWT_ACCESS_TTL_SECONDS", 3600)?;
        let jwt_refresh_ttl_seconds = read_u64_with_default("OMS_JWT_REFRESH_TTL_SECONDS", 86400)?;
        let http_addr = env::var("OMS_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let seed_demo_data = read_bool_with_default("OMS_SEED_DEMO_DATA", true);

        Ok(Self {
            http_addr,
            jwt_secret,
            jwt_access_ttl_seconds,
            jwt_refresh_ttl_seconds,
            seed_demo_data,
        })
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
