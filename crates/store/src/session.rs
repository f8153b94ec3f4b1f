use dashmap::DashMap;
use finboard_core::common::Theme;
use finboard_core::store::error::StoreError;
use finboard_core::store::port::{KEY_THEME, KEY_USERNAME};

/// # Summary
/// 会话级键值，仅随所属存储实例存活。
///
/// # Invariants
/// - 不落盘；实例销毁即视为会话结束。
#[derive(Default)]
pub(crate) struct SessionScope {
    values: DashMap<&'static str, String>,
}

impl SessionScope {
    pub(crate) fn username(&self) -> Option<String> {
        self.values.get(KEY_USERNAME).map(|v| v.value().clone())
    }

    pub(crate) fn set_username(&self, username: Option<&str>) {
        match username {
            Some(name) => {
                self.values.insert(KEY_USERNAME, name.to_string());
            }
            None => {
                self.values.remove(KEY_USERNAME);
            }
        }
    }

    /// # Summary
    /// 读取主题。
    ///
    /// # Logic
    /// 1. 未设置时返回 None。
    /// 2. 已保存的值无法识别时返回 `StoreError::Corrupted`。
    pub(crate) fn theme(&self) -> Result<Option<Theme>, StoreError> {
        match self.values.get(KEY_THEME) {
            None => Ok(None),
            Some(raw) => raw
                .value()
                .parse::<Theme>()
                .map(Some)
                .map_err(|_| StoreError::Corrupted {
                    key: KEY_THEME.to_string(),
                    value: raw.value().clone(),
                }),
        }
    }

    pub(crate) fn set_theme(&self, theme: Theme) {
        self.values.insert(KEY_THEME, theme.class_name().to_string());
    }

    #[cfg(test)]
    pub(crate) fn set_raw(&self, key: &'static str, value: &str) {
        self.values.insert(key, value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_set_and_clear() {
        let scope = SessionScope::default();
        assert_eq!(scope.username(), None);
        scope.set_username(Some("alice"));
        assert_eq!(scope.username().as_deref(), Some("alice"));
        scope.set_username(None);
        assert_eq!(scope.username(), None);
    }

    #[test]
    fn test_unknown_theme_is_reported() {
        let scope = SessionScope::default();
        scope.set_raw(KEY_THEME, "sepia");
        assert!(matches!(scope.theme(), Err(StoreError::Corrupted { .. })));
        scope.set_theme(Theme::Light);
        assert_eq!(scope.theme().unwrap(), Some(Theme::Light));
    }
}
