use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// # Summary
/// 单只股票的行情快照，包含当前价与历史序列。
///
/// # Invariants
/// - `history.dates` 与 `history.prices` 按下标一一对应。
/// - 每次拉取都整体替换，不做增量合并。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    // 股票代码
    pub ticker: String,
    // 当前价 (部分服务端以 closing_price 返回)
    #[serde(alias = "closing_price")]
    pub current_price: f64,
    // 历史价格序列
    #[serde(default)]
    pub history: PriceHistory,
    // 成交量序列
    #[serde(default)]
    pub volume: Vec<f64>,
}

/// # Summary
/// 日期与价格的平行序列。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceHistory {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

/// # Summary
/// 热门股票快照中单个标的的价格表示。
///
/// # Invariants
/// - 服务端可能直接给出数值，也可能给出 `日期 -> 价格` 的映射。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PricePoint {
    // 直接给出的价格
    Flat(f64),
    // 按日期索引的价格，键为 YYYY-MM-DD
    Dated(BTreeMap<String, Option<f64>>),
}

impl PricePoint {
    /// # Summary
    /// 解析出最新价格。
    ///
    /// # Logic
    /// 1. `Flat` 直接返回。
    /// 2. `Dated` 按日期倒序查找第一个非空价格。
    ///
    /// # Returns
    /// 返回最新价格，全部为空时返回 None。
    pub fn latest(&self) -> Option<f64> {
        match self {
            PricePoint::Flat(price) => Some(*price),
            PricePoint::Dated(series) => series.values().rev().find_map(|p| *p),
        }
    }
}

/// 热门股票快照：股票代码 -> 价格
pub type TopStocks = BTreeMap<String, PricePoint>;

/// # Summary
/// 热门股票的历史收盘价，用于仪表盘的多序列折线图。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoricalTopStocks {
    // X 轴日期标签
    pub dates: Vec<String>,
    // 股票代码 -> 收盘价序列
    pub data: BTreeMap<String, Vec<f64>>,
}

/// # Summary
/// 数值型指标，服务端可能以数字或字符串（如 `"21.5%"`）返回。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
}

impl NumericValue {
    /// # Summary
    /// 转换为浮点数。
    ///
    /// # Logic
    /// 1. 数字直接返回。
    /// 2. 字符串去除空白与末尾的 `%` 后解析。
    ///
    /// # Returns
    /// 解析失败时返回 None。
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Number(v) => Some(*v),
            NumericValue::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

/// # Summary
/// 单个标的的年度营收趋势。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueTrends {
    pub dates: Vec<String>,
    #[serde(alias = "revenues")]
    pub revenue: Vec<NumericValue>,
}

/// # Summary
/// 盈利指标值：单值或按期排列的序列。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MetricSeries {
    Many(Vec<NumericValue>),
    One(NumericValue),
}

impl MetricSeries {
    /// 展开为可绘制的数值序列，丢弃无法解析的项。
    pub fn values(&self) -> Vec<f64> {
        match self {
            MetricSeries::Many(items) => items.iter().filter_map(NumericValue::as_f64).collect(),
            MetricSeries::One(item) => item.as_f64().into_iter().collect(),
        }
    }
}

/// # Summary
/// 单个标的的盈利概览。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EarningsInsights {
    #[serde(rename = "EPS", default)]
    pub eps: Option<MetricSeries>,
    #[serde(rename = "ProfitMargin", default)]
    pub profit_margin: Option<MetricSeries>,
    #[serde(rename = "OperatingMarginTTM", default)]
    pub operating_margin_ttm: Option<MetricSeries>,
}

/// # Summary
/// 市场新闻条目。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub content: String,
    // 发布时间，格式 `%Y-%m-%d %H:%M:%S`
    #[serde(with = "posted_on_format")]
    pub posted_on: NaiveDateTime,
    // 逗号分隔的关联股票代码
    #[serde(default)]
    pub tickers: Option<String>,
}

impl NewsItem {
    /// 拆分关联股票代码列表。
    pub fn ticker_list(&self) -> Vec<&str> {
        self.tickers
            .as_deref()
            .map(|t| t.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}

mod posted_on_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// # Summary
/// 新闻排序方式。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NewsSort {
    #[default]
    #[serde(rename = "LATEST")]
    Latest,
    #[serde(rename = "EARLIEST")]
    Earliest,
}

impl std::str::FromStr for NewsSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LATEST" => Ok(NewsSort::Latest),
            "EARLIEST" => Ok(NewsSort::Earliest),
            _ => Err(format!("Unknown NewsSort: {}", s)),
        }
    }
}

impl std::fmt::Display for NewsSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsSort::Latest => write!(f, "LATEST"),
            NewsSort::Earliest => write!(f, "EARLIEST"),
        }
    }
}

/// # Summary
/// 新闻查询条件，全部为空时由服务端使用默认值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsQuery {
    pub tickers: Vec<String>,
    // 起始日期 YYYY-MM-DD
    pub time_from: Option<chrono::NaiveDate>,
    // 截止日期 YYYY-MM-DD
    pub time_to: Option<chrono::NaiveDate>,
    pub sort: Option<NewsSort>,
    pub limit: Option<u32>,
}

impl NewsQuery {
    /// # Summary
    /// 转换为 URL 查询参数。
    ///
    /// # Logic
    /// 1. 仅输出已设置的字段。
    /// 2. 股票代码以逗号拼接，日期格式化为 `%Y-%m-%d`。
    ///
    /// # Returns
    /// 返回键值对列表。
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.tickers.is_empty() {
            params.push(("tickers", self.tickers.join(",")));
        }
        if let Some(from) = self.time_from {
            params.push(("time_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.time_to {
            params.push(("time_to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_accepts_closing_price_without_history() {
        let quote: Quote =
            serde_json::from_str(r#"{"ticker": "AAPL", "closing_price": 189.5}"#).unwrap();
        assert_eq!(quote.current_price, 189.5);
        assert!(quote.history.prices.is_empty());
        assert!(quote.volume.is_empty());
    }

    #[test]
    fn test_price_point_latest_skips_missing_days() {
        let top: TopStocks = serde_json::from_str(
            r#"{"AAPL": 190.0, "MSFT": {"2024-08-29": 410.0, "2024-08-30": null}}"#,
        )
        .unwrap();
        assert_eq!(top["AAPL"].latest(), Some(190.0));
        assert_eq!(top["MSFT"].latest(), Some(410.0));
    }

    #[test]
    fn test_numeric_value_parses_percent_strings() {
        assert_eq!(NumericValue::Text("21.5%".into()).as_f64(), Some(21.5));
        assert_eq!(NumericValue::Text(" 2.50 ".into()).as_f64(), Some(2.5));
        assert_eq!(NumericValue::Text("None".into()).as_f64(), None);
    }

    #[test]
    fn test_earnings_single_and_list_values() {
        let insights: EarningsInsights = serde_json::from_str(
            r#"{"EPS": ["2.50", "2.75"], "ProfitMargin": "0.24", "OperatingMarginTTM": null}"#,
        )
        .unwrap();
        assert_eq!(insights.eps.map(|m| m.values()), Some(vec![2.5, 2.75]));
        assert_eq!(insights.profit_margin.map(|m| m.values()), Some(vec![0.24]));
        assert!(insights.operating_margin_ttm.is_none());
    }

    #[test]
    fn test_news_item_format() {
        let item: NewsItem = serde_json::from_str(
            r#"{"title": "t", "content": "c", "posted_on": "2024-08-30 14:30:00", "tickers": "TSLA, AAPL"}"#,
        )
        .unwrap();
        assert_eq!(item.ticker_list(), vec!["TSLA", "AAPL"]);
        assert_eq!(item.posted_on.format("%H:%M").to_string(), "14:30");
    }

    #[test]
    fn test_news_query_params_only_include_set_fields() {
        let query = NewsQuery {
            tickers: vec!["AAPL".into(), "MSFT".into()],
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            query.to_params(),
            vec![("tickers", "AAPL,MSFT".to_string()), ("limit", "5".to_string())]
        );
        assert!(NewsQuery::default().to_params().is_empty());
    }
}
