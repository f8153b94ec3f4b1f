use crate::chart::entity::ChartConfig;
use crate::chart::error::ChartError;

/// # Summary
/// 渲染器创建出的一个活动图表实例。
///
/// # Invariants
/// - 实例不支持原地更新，数据变化时必须销毁后重建。
/// - `destroy` 消费实例本身，销毁后不可再访问。
pub trait ChartInstance: Send + Sync {
    /// 实例在渲染器内的唯一编号
    fn id(&self) -> u64;

    /// 创建实例时使用的配置
    fn config(&self) -> &ChartConfig;

    /// # Summary
    /// 销毁实例并释放渲染器侧的资源。
    fn destroy(self: Box<Self>);
}

/// # Summary
/// 外部图表库的适配接口 (Port)。
///
/// # Invariants
/// - 同一画布上的旧实例由调用方负责先行销毁。
pub trait ChartRenderer: Send + Sync {
    /// # Summary
    /// 在指定画布上创建图表。
    ///
    /// # Logic
    /// 1. 获取画布的绘图上下文。
    /// 2. 按配置构建图表实例。
    ///
    /// # Arguments
    /// * `canvas`: 画布名称。
    /// * `config`: 图表配置。
    ///
    /// # Returns
    /// 成功返回活动实例，画布不可用时返回 `ChartError::CanvasUnavailable`。
    fn create(&self, canvas: &str, config: ChartConfig)
    -> Result<Box<dyn ChartInstance>, ChartError>;
}

/// # Summary
/// 序列颜色分配器，可替换为确定性实现以便测试。
pub trait ColorPicker: Send + Sync {
    /// 返回下一个颜色字符串 (如 `#1A2B3C`)
    fn next_color(&self) -> String;
}
