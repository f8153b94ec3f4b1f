use crate::session::SessionScope;
use async_trait::async_trait;
use finboard_core::common::Theme;
use finboard_core::store::error::StoreError;
use finboard_core::store::port::{KEY_API_URL, SettingsStore};
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// 默认设置数据库文件名
const DEFAULT_SETTINGS_DB: &str = "settings.db";

/// SettingsStore 的 SQLite 实现。
///
/// # Summary
/// 将 `apiUrl` 等长期设置保存在 `settings.db` 的键值表中，
/// 用户名与主题则保存在实例内存中，随进程结束而失效。
///
/// # Invariants
/// * 数据库结构在存储实例创建时初始化。
/// * 写入 `apiUrl` 后立即落盘，重新打开同一目录即可读到。
pub struct SqliteSettingsStore {
    pool: SqlitePool,
    default_api_url: String,
    session: SessionScope,
}

impl SqliteSettingsStore {
    /// 在配置的数据根目录下创建设置存储。
    ///
    /// # Arguments
    /// * `default_api_url` - 尚未保存地址时使用的默认值。
    pub async fn new(default_api_url: &str) -> Result<Self, StoreError> {
        let root = crate::config::get_root_dir();
        Self::open(&root, default_api_url).await
    }

    /// 在指定目录下打开 (或创建) 设置数据库。
    ///
    /// # Logic
    /// 1. 确保目录存在。
    /// 2. 配置 SQLite 连接选项，开启 `create_if_missing`。
    /// 3. 连接数据库并执行 DDL 初始化 `settings` 表。
    ///
    /// # Arguments
    /// * `dir` - 数据库所在目录。
    /// * `default_api_url` - 尚未保存地址时使用的默认值。
    ///
    /// # Returns
    /// * `Result<Self, StoreError>` - 存储实例或初始化错误。
    pub async fn open(dir: &Path, default_api_url: &str) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::InitError(e.to_string()))?;

        let db_path = dir.join(DEFAULT_SETTINGS_DB);
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| StoreError::InitError(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::InitError(e.to_string()))?;

        info!("Settings store opened at {}", db_path.display());

        Ok(Self {
            pool,
            default_api_url: default_api_url.to_string(),
            session: SessionScope::default(),
        })
    }

    /// 关闭连接池，等待未完成的写入结束。
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|r| r.try_get::<String, _>("value"))
            .transpose()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn api_url(&self) -> Result<String, StoreError> {
        Ok(self
            .get_setting(KEY_API_URL)
            .await?
            .unwrap_or_else(|| self.default_api_url.clone()))
    }

    async fn set_api_url(&self, url: &str) -> Result<(), StoreError> {
        self.put_setting(KEY_API_URL, url).await?;
        debug!("Saved {} = {}", KEY_API_URL, url);
        Ok(())
    }

    async fn username(&self) -> Result<Option<String>, StoreError> {
        Ok(self.session.username())
    }

    async fn set_username(&self, username: Option<&str>) -> Result<(), StoreError> {
        self.session.set_username(username);
        Ok(())
    }

    async fn theme(&self) -> Result<Option<Theme>, StoreError> {
        self.session.theme()
    }

    async fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.session.set_theme(theme);
        Ok(())
    }
}
