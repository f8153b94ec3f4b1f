use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 界面主题枚举，对应页面根节点上的样式类名。
///
/// # Invariants
/// - 序列化形式固定为 `is-dark` / `is-light`，与持久化的主题名保持一致。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Theme {
    // 深色主题
    #[serde(rename = "is-dark")]
    Dark,
    // 浅色主题
    #[serde(rename = "is-light")]
    Light,
}

impl Theme {
    /// # Summary
    /// 计算切换后的主题。
    ///
    /// # Logic
    /// 1. 当前为深色时切换为浅色。
    /// 2. 其余情况（包括尚未设置主题）一律切换为深色。
    ///
    /// # Arguments
    /// * `current`: 当前主题，可能为空。
    ///
    /// # Returns
    /// 返回切换后的主题。
    pub fn toggled(current: Option<Theme>) -> Theme {
        match current {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// 返回主题对应的样式类名。
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Dark => "is-dark",
            Theme::Light => "is-light",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "is-dark" | "dark" => Ok(Theme::Dark),
            "is-light" | "light" => Ok(Theme::Light),
            _ => Err(format!("Unknown Theme: {}", s)),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// # Summary
/// 规范化用户输入的股票代码。
///
/// # Logic
/// 1. 去除首尾空白。
/// 2. 空字符串视为无效输入。
/// 3. 统一转为大写。
///
/// # Arguments
/// * `raw`: 原始输入。
///
/// # Returns
/// 合法时返回规范化后的代码，否则返回 None。
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_uppercase())
}
