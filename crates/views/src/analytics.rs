use finboard_core::market::entity::{MetricSeries, RevenueTrends, TopStocks};
use finboard_core::portfolio::entity::{Position, PortfolioTotals};
use std::collections::BTreeMap;

/// # Summary
/// 计算最后两个价格之间的涨跌幅 (百分比)。
///
/// # Logic
/// `(last - second_last) / second_last * 100`。
///
/// # Returns
/// 不足两个价格时返回 None。`second_last` 为 0 时按 IEEE 规则返回无穷或 NaN。
pub fn percent_change(prices: &[f64]) -> Option<f64> {
    match prices {
        [.., second_last, last] => Some((last - second_last) / second_last * 100.0),
        _ => None,
    }
}

/// # Summary
/// 成交量的算术平均值。
///
/// # Returns
/// 空序列返回 NaN。
pub fn average_volume(volumes: &[f64]) -> f64 {
    let (sum, count) = volumes
        .iter()
        .fold((0.0_f64, 0.0_f64), |(sum, count), v| (sum + v, count + 1.0));
    sum / count
}

/// # Summary
/// 汇总投资组合。
///
/// # Logic
/// 1. 总投入 = Σ 买入价 × 股数，总市值 = Σ 当前价 × 股数。
/// 2. 总盈亏 = 总市值 - 总投入。
/// 3. 总投入为 0 时盈亏百分比为 None。
pub fn portfolio_totals(positions: &[Position]) -> PortfolioTotals {
    let (total_investment, total_value) =
        positions
            .iter()
            .fold((0.0_f64, 0.0_f64), |(investment, value), p| {
                let shares = f64::from(p.shares);
                (
                    investment + p.purchase_price * shares,
                    value + p.current_price * shares,
                )
            });

    let total_profit = total_value - total_investment;
    let profit_percent = if total_investment == 0.0 {
        None
    } else {
        Some(total_profit / total_investment * 100.0)
    };

    PortfolioTotals {
        total_investment,
        total_value,
        total_profit,
        profit_percent,
    }
}

/// 热门股票快照解析为 `代码 -> 最新价`，没有价格的标的被跳过。
pub fn latest_prices(top: &TopStocks) -> BTreeMap<String, f64> {
    top.iter()
        .filter_map(|(ticker, point)| point.latest().map(|p| (ticker.clone(), p)))
        .collect()
}

/// # Summary
/// 营收趋势转换为图表可用的 (日期, 数值) 两列。
///
/// # Logic
/// 日期与数值按下标配对，无法解析的数值连同其日期一起丢弃。
pub fn revenue_points(trends: &RevenueTrends) -> (Vec<String>, Vec<f64>) {
    trends
        .dates
        .iter()
        .zip(trends.revenue.iter())
        .filter_map(|(date, value)| value.as_f64().map(|v| (date.clone(), v)))
        .unzip()
}

/// 指标序列展开为数值，缺失时为空。
pub fn metric_values(metric: Option<&MetricSeries>) -> Vec<f64> {
    metric.map(MetricSeries::values).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::market::entity::NumericValue;

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(&[]), None);
        assert_eq!(percent_change(&[100.0]), None);
        assert_eq!(percent_change(&[100.0, 110.0]), Some(10.0));
        assert_eq!(percent_change(&[50.0, 100.0, 110.0]), Some(10.0));
        assert_eq!(percent_change(&[100.0, 0.0]), Some(-100.0));
        assert_eq!(percent_change(&[0.0, 5.0]), Some(f64::INFINITY));
        assert!(percent_change(&[0.0, 0.0]).is_some_and(f64::is_nan));
    }

    #[test]
    fn test_average_volume() {
        assert_eq!(average_volume(&[100.0, 200.0, 300.0]), 200.0);
        assert!(average_volume(&[]).is_nan());
    }

    #[test]
    fn test_portfolio_totals() {
        let positions = vec![Position {
            ticker: "AAPL".into(),
            shares: 5,
            purchase_price: 10.0,
            current_price: 12.0,
        }];
        let totals = portfolio_totals(&positions);
        assert_eq!(totals.total_investment, 50.0);
        assert_eq!(totals.total_value, 60.0);
        assert_eq!(totals.total_profit, 10.0);
        assert_eq!(totals.profit_percent, Some(20.0));
    }

    #[test]
    fn test_portfolio_totals_without_investment() {
        let totals = portfolio_totals(&[]);
        assert_eq!(totals, PortfolioTotals::default());
        assert_eq!(totals.profit_percent, None);
    }

    #[test]
    fn test_revenue_points_drop_unparseable_values() {
        let trends = RevenueTrends {
            dates: vec!["2022".into(), "2023".into(), "2024".into()],
            revenue: vec![
                NumericValue::Number(1.0),
                NumericValue::Text("n/a".into()),
                NumericValue::Text("3.5".into()),
            ],
        };
        let (dates, values) = revenue_points(&trends);
        assert_eq!(dates, vec!["2022", "2024"]);
        assert_eq!(values, vec![1.0, 3.5]);
    }
}
