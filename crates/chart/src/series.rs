use finboard_core::chart::entity::{ChartConfig, ChartData, ChartKind, ChartOptions, ChartSeries};
use finboard_core::chart::port::ColorPicker;
use std::collections::BTreeMap;

/// 数据尚未到达时占位图表的图例
pub const PLACEHOLDER_LABEL: &str = "Waiting for data...";

/// # Summary
/// 将 `序列名 -> 数值序列` 的映射展开为图表序列。
///
/// # Logic
/// 1. 按键的字典序遍历，保证序列顺序稳定。
/// 2. 每个键生成一条序列，颜色由 `picker` 依次分配。
///
/// # Arguments
/// * `named`: 序列名到数值的映射。
/// * `picker`: 颜色分配器。
///
/// # Returns
/// 与键数量相同的序列列表。
pub fn build_series(named: &BTreeMap<String, Vec<f64>>, picker: &dyn ColorPicker) -> Vec<ChartSeries> {
    named
        .iter()
        .map(|(label, values)| ChartSeries::new(label.clone(), values.clone(), picker.next_color()))
        .collect()
}

/// 多序列折线图。
pub fn line_chart(labels: Vec<String>, series: Vec<ChartSeries>) -> ChartConfig {
    ChartConfig::new(
        ChartKind::Line,
        ChartData { labels, series },
        ChartOptions::default(),
    )
}

/// # Summary
/// 单序列柱状图，Y 轴从 0 开始。
pub fn bar_chart(labels: Vec<String>, series: ChartSeries) -> ChartConfig {
    ChartConfig::new(
        ChartKind::Bar,
        ChartData {
            labels,
            series: vec![series],
        },
        ChartOptions {
            responsive: true,
            begin_at_zero: true,
        },
    )
}

/// # Summary
/// 价格折线图：单条序列，曲线下方填充。
pub fn price_chart(ticker: &str, dates: Vec<String>, prices: Vec<f64>, color: String) -> ChartConfig {
    let mut series = ChartSeries::new(format!("{ticker} Price"), prices, color.clone());
    series.background = Some(color);
    series.fill = true;
    line_chart(dates, vec![series])
}

/// # Summary
/// 数据到达前展示的空折线图。
pub fn placeholder_chart() -> ChartConfig {
    line_chart(
        Vec::new(),
        vec![ChartSeries::new(PLACEHOLDER_LABEL, Vec::new(), "#B4B4B4")],
    )
}

/// 为柱状图生成 `1..=n` 的期数标签。
pub fn period_labels(len: usize) -> Vec<String> {
    (1..=len).map(|i| format!("Q{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{FixedPalette, RandomPalette, is_valid_color};

    #[test]
    fn test_build_series_one_per_key_in_key_order() {
        let mut named = BTreeMap::new();
        named.insert("MSFT".to_string(), vec![410.0, 415.0]);
        named.insert("AAPL".to_string(), vec![190.0, 192.0]);
        let palette = FixedPalette::new(["#111111", "#222222"]);

        let series = build_series(&named, &palette);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "AAPL");
        assert_eq!(series[0].color, "#111111");
        assert_eq!(series[1].label, "MSFT");
        assert_eq!(series[1].values, vec![410.0, 415.0]);
    }

    #[test]
    fn test_build_series_random_colors_are_valid() {
        let mut named = BTreeMap::new();
        named.insert("AAPL".to_string(), vec![1.0]);
        named.insert("TSLA".to_string(), vec![2.0]);

        let series = build_series(&named, &RandomPalette);

        assert!(series.iter().all(|s| is_valid_color(&s.color)));
    }

    #[test]
    fn test_series_points_pair_with_labels() {
        let config = price_chart(
            "AAPL",
            vec!["2024-01-01".into(), "2024-01-02".into()],
            vec![1.0, 2.0],
            "#123456".into(),
        );
        let series = &config.data.series[0];
        let points: Vec<_> = series.points(&config.data.labels).collect();
        assert_eq!(points, vec![("2024-01-01", 1.0), ("2024-01-02", 2.0)]);
        assert_eq!(series.label, "AAPL Price");
        assert!(series.fill);
    }

    #[test]
    fn test_placeholder_is_empty_line_chart() {
        let config = placeholder_chart();
        assert_eq!(config.kind, ChartKind::Line);
        assert!(config.data.labels.is_empty());
        assert_eq!(config.data.series[0].label, PLACEHOLDER_LABEL);
    }

    #[test]
    fn test_bar_chart_begins_at_zero() {
        let config = bar_chart(period_labels(2), ChartSeries::new("EPS", vec![1.0, 2.0], "#000000"));
        assert!(config.options.begin_at_zero);
        assert_eq!(config.data.labels, vec!["Q1", "Q2"]);
    }
}
