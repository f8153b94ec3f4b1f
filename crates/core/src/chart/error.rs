use thiserror::Error;

/// # Summary
/// 图表渲染错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum ChartError {
    /// 画布不存在或无法获取绘图上下文
    #[error("Canvas unavailable: {0}")]
    CanvasUnavailable(String),
}
