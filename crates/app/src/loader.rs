use config::{Config, ConfigError, Environment, File};
use finboard_core::config::AppConfig;
use std::path::Path;

/// 默认配置文件名 (不含扩展名)
const DEFAULT_CONFIG_FILE: &str = "finboard";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取指定的配置文件；未指定时尝试当前目录下可选的 `finboard.toml`。
/// 2. 叠加 `FINBOARD__` 前缀的环境变量，例如 `FINBOARD__API__BASE_URL`。
/// 3. 缺失的字段使用 `AppConfig` 的默认值。
///
/// # Arguments
/// * `path` - 命令行指定的配置文件路径。
///
/// # Returns
/// * 解析后的配置，或配置格式错误。
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix("FINBOARD").separator("__"))
        .build()?
        .try_deserialize()
}
