use crate::context::AppContext;
use tracing::{info, warn};

/// # Summary
/// 校验 API 地址：整串匹配 `https?://.+`。
///
/// # Logic
/// 1. 必须以 `http://` 或 `https://` 开头。
/// 2. 前缀之后至少一个字符，且不含换行。
pub fn is_valid_api_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|r| !r.is_empty() && !r.contains(['\n', '\r']))
}

/// # Summary
/// 团队设置视图：编辑 API 基础地址。
///
/// # Invariants
/// - 只有通过校验的地址才会写入存储并切换网关。
pub struct TeamSettingsView {
    ctx: AppContext,
    pub api_url: String,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl TeamSettingsView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            api_url: String::new(),
            message: None,
            error: None,
        }
    }

    /// 读取当前保存的地址填入表单。
    pub async fn load(&mut self) {
        match self.ctx.store.api_url().await {
            Ok(url) => self.api_url = url,
            Err(e) => {
                warn!("Failed to read API URL: {}", e);
                self.error = Some(format!("Failed to load settings: {}", e));
            }
        }
    }

    /// # Summary
    /// 保存新地址。
    ///
    /// # Logic
    /// 1. 地址不合法时记录错误，存储与网关均不变。
    /// 2. 写入存储成功后切换网关的基础地址。
    ///
    /// # Returns
    /// 是否保存成功。
    pub async fn save(&mut self, url: &str) -> bool {
        let url = url.trim();
        if !is_valid_api_url(url) {
            self.message = None;
            self.error = Some("Please enter a valid URL starting with http:// or https://".to_string());
            return false;
        }

        if let Err(e) = self.ctx.store.set_api_url(url).await {
            warn!("Failed to save API URL: {}", e);
            self.message = None;
            self.error = Some(format!("Failed to save settings: {}", e));
            return false;
        }

        self.ctx.gateway.set_base_url(url);
        info!("API URL changed to {}", url);
        self.api_url = url.to_string();
        self.error = None;
        self.message = Some("Settings saved successfully".to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_pattern() {
        assert!(is_valid_api_url("http://localhost:5000"));
        assert!(is_valid_api_url("https://api.example.com"));
        assert!(!is_valid_api_url("https://"));
        assert!(!is_valid_api_url("ftp://example.com"));
        assert!(!is_valid_api_url("example.com"));
        assert!(!is_valid_api_url(" http://example.com"));
        assert!(!is_valid_api_url("http://a\nb"));
    }
}
