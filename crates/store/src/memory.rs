use crate::session::SessionScope;
use async_trait::async_trait;
use dashmap::DashMap;
use finboard_core::common::Theme;
use finboard_core::store::error::StoreError;
use finboard_core::store::port::{KEY_API_URL, SettingsStore};

/// # Summary
/// 纯内存的 SettingsStore，实现与 SQLite 版本相同的语义，
/// 但所有数据随实例销毁。用于测试与一次性命令。
pub struct MemorySettingsStore {
    default_api_url: String,
    durable: DashMap<&'static str, String>,
    session: SessionScope,
}

impl MemorySettingsStore {
    pub fn new(default_api_url: &str) -> Self {
        Self {
            default_api_url: default_api_url.to_string(),
            durable: DashMap::new(),
            session: SessionScope::default(),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn api_url(&self) -> Result<String, StoreError> {
        Ok(self
            .durable
            .get(KEY_API_URL)
            .map(|v| v.value().clone())
            .unwrap_or_else(|| self.default_api_url.clone()))
    }

    async fn set_api_url(&self, url: &str) -> Result<(), StoreError> {
        self.durable.insert(KEY_API_URL, url.to_string());
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
