use serde::{Deserialize, Serialize};

/// 远端 API 的默认地址
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub trade: TradeConfig,
    pub dashboard: DashboardConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// 买卖请求中携带的用户标识
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 营收与盈利图表关注的标的
    pub focus_ticker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            trade: TradeConfig::default(),
            dashboard: DashboardConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            user_id: "admin".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            focus_ticker: "AAPL".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.data_dir, "data");
        assert_eq!(config.trade.user_id, "admin");
        assert_eq!(config.dashboard.focus_ticker, "AAPL");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api": {"base_url": "https://api.example.com"}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.trade.user_id, "admin");
    }
}
