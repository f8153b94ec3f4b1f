use serde::{Deserialize, Serialize};

/// # Summary
/// 图表类型。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// # Summary
/// 单条数据序列。
///
/// # Invariants
/// - `values[i]` 对应所在 `ChartData::labels[i]`，两者共同构成有序的 (x, y) 点列。
/// - `color` 为合法的 CSS 颜色字符串。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    // 图例名称
    pub label: String,
    // Y 值序列
    pub values: Vec<f64>,
    // 线条 / 边框颜色
    pub color: String,
    // 填充颜色 (可选)
    pub background: Option<String>,
    // 是否填充曲线下方区域
    pub fill: bool,
    // 曲线张力
    pub tension: f64,
}

impl ChartSeries {
    /// 以默认样式创建序列。
    pub fn new(label: impl Into<String>, values: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values,
            color: color.into(),
            background: None,
            fill: false,
            tension: 0.1,
        }
    }

    /// # Summary
    /// 与 X 轴标签配对得到 (x, y) 点列。
    ///
    /// # Logic
    /// 按下标配对，较长一侧的多余元素被忽略。
    pub fn points<'a>(&'a self, labels: &'a [String]) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// # Summary
/// 图表数据：共享的 X 轴标签与若干序列。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// # Summary
/// 渲染选项。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartOptions {
    // 是否随容器尺寸自适应
    pub responsive: bool,
    // Y 轴是否从 0 开始
    pub begin_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            begin_at_zero: false,
        }
    }
}

/// # Summary
/// 交给渲染器的完整图表配置。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, data: ChartData, options: ChartOptions) -> Self {
        Self { kind, data, options }
    }
}
