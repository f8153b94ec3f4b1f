use super::error::StoreError;
use crate::common::Theme;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 持久化键：API 基础地址 (长期保存)
pub const KEY_API_URL: &str = "apiUrl";
/// 会话键：已登录用户名
pub const KEY_USERNAME: &str = "username";
/// 会话键：界面主题
pub const KEY_THEME: &str = "theme";

/// # Summary
/// 跨视图共享的会话快照。
///
/// # Invariants
/// - `username` 存在即表示已登录。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub theme: Option<Theme>,
    pub api_url: String,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}

/// # Summary
/// 会话与设置存储接口。
///
/// # Invariants
/// - `apiUrl` 为持久化数据，重新打开存储后仍可读取。
/// - `username` 与 `theme` 仅在存储实例的生命周期内有效。
/// - 存储层不做任何格式校验，校验由设置表单负责。
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// # Summary
    /// 读取 API 基础地址。
    ///
    /// # Logic
    /// 1. 读取持久化的 `apiUrl`。
    /// 2. 未设置时回退到实例创建时给定的默认地址。
    ///
    /// # Returns
    /// 返回生效的基础地址。
    async fn api_url(&self) -> Result<String, StoreError>;

    /// # Summary
    /// 写入 API 基础地址。
    ///
    /// # Arguments
    /// * `url`: 已通过表单校验的地址。
    async fn set_api_url(&self, url: &str) -> Result<(), StoreError>;

    /// 读取已登录用户名。
    async fn username(&self) -> Result<Option<String>, StoreError>;

    /// # Summary
    /// 写入或清除已登录用户名。
    ///
    /// # Arguments
    /// * `username`: `Some` 表示登录，`None` 表示登出。
    async fn set_username(&self, username: Option<&str>) -> Result<(), StoreError>;

    /// 读取当前主题。
    async fn theme(&self) -> Result<Option<Theme>, StoreError>;

    /// 写入当前主题。
    async fn set_theme(&self, theme: Theme) -> Result<(), StoreError>;

    /// # Summary
    /// 汇总当前会话。
    ///
    /// # Logic
    /// 依次读取用户名、主题与基础地址并组装为 `Session`。
    async fn load_session(&self) -> Result<Session, StoreError> {
        Ok(Session {
            username: self.username().await?,
            theme: self.theme().await?,
            api_url: self.api_url().await?,
        })
    }
}
