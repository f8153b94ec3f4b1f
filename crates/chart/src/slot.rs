use finboard_core::chart::entity::ChartConfig;
use finboard_core::chart::error::ChartError;
use finboard_core::chart::port::{ChartInstance, ChartRenderer};
use tracing::{debug, error};

/// # Summary
/// 图表槽位的渲染状态。
///
/// # Invariants
/// - 没有终止状态，任何状态都可以通过一次成功的刷新进入 `Populated`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    // 尚未创建任何图表，或最近一次创建失败
    Absent,
    // 数据到达前的占位图表
    Placeholder,
    // 已用真实数据渲染
    Populated,
}

/// # Summary
/// 视图中的一个图表位置，持有至多一个活动实例。
///
/// # Invariants
/// - 任意时刻最多一个活动实例。
/// - 创建新实例前必须先销毁旧实例。
/// - 创建失败时槽位回到 `Absent`，不保留旧实例。
pub struct ChartSlot {
    // 画布名称
    canvas: String,
    // 当前活动实例
    instance: Option<Box<dyn ChartInstance>>,
    state: SlotState,
}

impl ChartSlot {
    pub fn new(canvas: impl Into<String>) -> Self {
        Self {
            canvas: canvas.into(),
            instance: None,
            state: SlotState::Absent,
        }
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    /// 当前活动实例的配置。
    pub fn config(&self) -> Option<&ChartConfig> {
        self.instance.as_ref().map(|i| i.config())
    }

    /// 当前活动实例的编号。
    pub fn instance_id(&self) -> Option<u64> {
        self.instance.as_ref().map(|i| i.id())
    }

    /// # Summary
    /// 视图挂载时展示占位图表。
    ///
    /// # Returns
    /// 渲染器无法创建图表时返回错误，槽位保持 `Absent`。
    pub fn show_placeholder(
        &mut self,
        renderer: &dyn ChartRenderer,
        config: ChartConfig,
    ) -> Result<(), ChartError> {
        self.replace(renderer, config, SlotState::Placeholder)
    }

    /// # Summary
    /// 用新数据重建图表。
    ///
    /// # Logic
    /// 1. 销毁旧实例 (如有)。
    /// 2. 按新配置创建实例，成功后进入 `Populated`。
    /// 3. 创建失败时记录错误并回到 `Absent`。
    ///
    /// # Arguments
    /// * `renderer`: 图表渲染器。
    /// * `config`: 新的图表配置。
    pub fn refresh(
        &mut self,
        renderer: &dyn ChartRenderer,
        config: ChartConfig,
    ) -> Result<(), ChartError> {
        self.replace(renderer, config, SlotState::Populated)
    }

    /// 销毁当前实例并回到 `Absent`。
    pub fn clear(&mut self) {
        if let Some(old) = self.instance.take() {
            debug!("Destroying chart {} on canvas {}", old.id(), self.canvas);
            old.destroy();
        }
        self.state = SlotState::Absent;
    }

    fn replace(
        &mut self,
        renderer: &dyn ChartRenderer,
        config: ChartConfig,
        target: SlotState,
    ) -> Result<(), ChartError> {
        self.clear();

        match renderer.create(&self.canvas, config) {
            Ok(instance) => {
                debug!(
                    "Created chart {} on canvas {} ({:?})",
                    instance.id(),
                    self.canvas,
                    target
                );
                self.instance = Some(instance);
                self.state = target;
                Ok(())
            }
            Err(e) => {
                error!("Failed to create chart on canvas {}: {}", self.canvas, e);
                Err(e)
            }
        }
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        self.clear();
    }
}
