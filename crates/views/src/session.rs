use crate::context::AppContext;
use finboard_core::common::Theme;
use tracing::{info, warn};

/// # Summary
/// 应用外壳视图：登录状态、登录登出与主题切换。
///
/// # Invariants
/// - 用户名写入存储即视为已登录，清除即登出。
pub struct SessionView {
    ctx: AppContext,
    pub username: Option<String>,
    pub theme: Option<Theme>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl SessionView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            username: None,
            theme: None,
            message: None,
            error: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    /// 从存储中读取登录状态。
    pub async fn check_login_status(&mut self) -> bool {
        match self.ctx.store.username().await {
            Ok(username) => self.username = username,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                self.username = None;
            }
        }
        self.is_logged_in()
    }

    /// # Summary
    /// 使用用户名与密码登录。
    ///
    /// # Logic
    /// 1. 调用登录接口。
    /// 2. 成功后把用户名写入存储。
    /// 3. 任一步失败都记录 `Login failed: ...`。
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        let receipt = match self.ctx.gateway.login(username, password).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!("Login failed for {}: {}", username, e);
                self.error = Some(format!("Login failed: {}", e.message()));
                return false;
            }
        };

        if let Err(e) = self.ctx.store.set_username(Some(username)).await {
            self.error = Some(format!("Login failed: {}", e));
            return false;
        }

        info!("{} logged in", username);
        self.username = Some(username.to_string());
        self.error = None;
        self.message = Some(
            receipt
                .message
                .unwrap_or_else(|| "Login successful".to_string()),
        );
        true
    }

    /// 登出并清除存储中的用户名。
    pub async fn logout(&mut self) {
        if let Err(e) = self.ctx.store.set_username(None).await {
            warn!("Failed to clear session: {}", e);
        }
        if let Some(name) = self.username.take() {
            info!("{} logged out", name);
        }
        self.message = None;
    }

    /// # Summary
    /// 切换主题并写入存储。
    ///
    /// # Logic
    /// 当前为深色时切换为浅色，其余情况切换为深色。
    pub async fn toggle_theme(&mut self) -> Theme {
        let current = match self.ctx.store.theme().await {
            Ok(theme) => theme,
            Err(e) => {
                warn!("Ignoring unreadable theme: {}", e);
                None
            }
        };
        let next = Theme::toggled(current);
        if let Err(e) = self.ctx.store.set_theme(next).await {
            warn!("Failed to save theme: {}", e);
        }
        self.theme = Some(next);
        next
    }

    /// 启动时应用已保存的主题。
    pub async fn apply_saved_theme(&mut self) -> Option<Theme> {
        match self.ctx.store.theme().await {
            Ok(theme) => self.theme = theme,
            Err(e) => warn!("Ignoring unreadable theme: {}", e),
        }
        self.theme
    }
}
