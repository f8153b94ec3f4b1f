use finboard_core::chart::port::{ChartRenderer, ColorPicker};
use finboard_core::config::AppConfig;
use finboard_core::gateway::port::FinanceGateway;
use finboard_core::store::port::SettingsStore;
use std::sync::Arc;

/// # Summary
/// 视图共享的依赖集合，由应用入口组装后注入到每个视图。
///
/// # Invariants
/// - 所有字段均为 `Arc`，克隆只增加引用计数。
/// - 会话状态只保存在 `store` 中，视图之间不直接共享可变状态。
#[derive(Clone)]
pub struct AppContext {
    pub gateway: Arc<dyn FinanceGateway>,
    pub store: Arc<dyn SettingsStore>,
    pub renderer: Arc<dyn ChartRenderer>,
    pub palette: Arc<dyn ColorPicker>,
    pub config: Arc<AppConfig>,
}

impl AppContext {
    pub fn new(
        gateway: Arc<dyn FinanceGateway>,
        store: Arc<dyn SettingsStore>,
        renderer: Arc<dyn ChartRenderer>,
        palette: Arc<dyn ColorPicker>,
        config: AppConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            renderer,
            palette,
            config: Arc::new(config),
        }
    }
}
