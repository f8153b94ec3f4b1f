use crate::analytics::{latest_prices, metric_values, revenue_points};
use crate::context::AppContext;
use finboard_chart::ChartSlot;
use finboard_chart::series::{bar_chart, build_series, line_chart, period_labels};
use finboard_core::chart::entity::ChartSeries;
use finboard_core::gateway::error::GatewayError;
use finboard_core::market::entity::{EarningsInsights, HistoricalTopStocks, NewsItem, NewsQuery, RevenueTrends};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const TOP_STOCKS_CANVAS: &str = "topStocksChart";
pub const REVENUE_CANVAS: &str = "revenueChart";
pub const EARNINGS_CANVAS: &str = "earningsChart";

/// # Summary
/// 仪表盘上独立加载的区块。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DashboardSection {
    TopStocksHistory,
    TopStocks,
    News,
    Revenue,
    Earnings,
}

impl DashboardSection {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardSection::TopStocksHistory => "top stocks history",
            DashboardSection::TopStocks => "top stocks",
            DashboardSection::News => "market news",
            DashboardSection::Revenue => "revenue trends",
            DashboardSection::Earnings => "earnings insights",
        }
    }
}

/// # Summary
/// 仪表盘视图：并发拉取五个区块并各自渲染。
///
/// # Invariants
/// - 每个区块独立失败，错误记录在 `section_errors` 中。
/// - `error` 为按区块顺序的第一个错误。
/// - 某区块失败时保留该区块上一次成功的数据。
pub struct DashboardView {
    ctx: AppContext,
    pub focus_ticker: String,
    pub historical: Option<HistoricalTopStocks>,
    pub top_stocks: BTreeMap<String, f64>,
    pub news: Vec<NewsItem>,
    pub revenue: Option<RevenueTrends>,
    pub earnings: Option<EarningsInsights>,
    pub section_errors: BTreeMap<DashboardSection, String>,
    pub error: Option<String>,
    top_chart: ChartSlot,
    revenue_chart: ChartSlot,
    earnings_chart: ChartSlot,
}

impl DashboardView {
    pub fn new(ctx: AppContext) -> Self {
        let focus_ticker = ctx.config.dashboard.focus_ticker.clone();
        Self {
            ctx,
            focus_ticker,
            historical: None,
            top_stocks: BTreeMap::new(),
            news: Vec::new(),
            revenue: None,
            earnings: None,
            section_errors: BTreeMap::new(),
            error: None,
            top_chart: ChartSlot::new(TOP_STOCKS_CANVAS),
            revenue_chart: ChartSlot::new(REVENUE_CANVAS),
            earnings_chart: ChartSlot::new(EARNINGS_CANVAS),
        }
    }

    /// 切换营收与盈利图表关注的标的。
    pub fn with_focus(mut self, ticker: impl Into<String>) -> Self {
        self.focus_ticker = ticker.into();
        self
    }

    /// # Summary
    /// 并发加载全部区块。
    ///
    /// # Logic
    /// 1. 五个请求同时发出，全部完成后再逐个处理。
    /// 2. 成功的区块更新数据并重建图表，失败的区块记录错误。
    pub async fn load(&mut self) {
        let gateway = Arc::clone(&self.ctx.gateway);
        let ticker = self.focus_ticker.clone();
        let news_query = NewsQuery::default();

        let (historical, top, news, revenue, earnings) = futures::join!(
            gateway.historical_top_stocks(),
            gateway.top_stocks(),
            gateway.market_news(&news_query),
            gateway.revenue_trends(&ticker),
            gateway.earnings_insights(&ticker)
        );

        self.section_errors.clear();

        match historical {
            Ok(data) => {
                self.render_top_stocks(&data);
                self.historical = Some(data);
            }
            Err(e) => self.record(DashboardSection::TopStocksHistory, &e),
        }

        match top {
            Ok(snapshot) => self.top_stocks = latest_prices(&snapshot),
            Err(e) => self.record(DashboardSection::TopStocks, &e),
        }

        match news {
            Ok(items) => self.news = items,
            Err(e) => self.record(DashboardSection::News, &e),
        }

        match revenue {
            Ok(trends) => {
                self.render_revenue(&trends);
                self.revenue = Some(trends);
            }
            Err(e) => self.record(DashboardSection::Revenue, &e),
        }

        match earnings {
            Ok(insights) => {
                self.render_earnings(&insights);
                self.earnings = Some(insights);
            }
            Err(e) => self.record(DashboardSection::Earnings, &e),
        }

        self.error = self.section_errors.values().next().cloned();
        info!(
            "Dashboard loaded with {} failed section(s)",
            self.section_errors.len()
        );
    }

    pub fn top_chart(&self) -> &ChartSlot {
        &self.top_chart
    }

    pub fn revenue_chart(&self) -> &ChartSlot {
        &self.revenue_chart
    }

    pub fn earnings_chart(&self) -> &ChartSlot {
        &self.earnings_chart
    }

    fn record(&mut self, section: DashboardSection, e: &GatewayError) {
        warn!("Failed to load {}: {}", section.title(), e);
        self.section_errors
            .insert(section, format!("Failed to load {}: {}", section.title(), e.message()));
    }

    fn render_top_stocks(&mut self, data: &HistoricalTopStocks) {
        let series = build_series(&data.data, self.ctx.palette.as_ref());
        let config = line_chart(data.dates.clone(), series);
        if let Err(e) = self.top_chart.refresh(self.ctx.renderer.as_ref(), config) {
            debug!("Top stocks chart left empty: {}", e);
        }
    }

    fn render_revenue(&mut self, trends: &RevenueTrends) {
        let (dates, values) = revenue_points(trends);
        let series = ChartSeries::new(
            format!("{} Revenue", self.focus_ticker),
            values,
            self.ctx.palette.next_color(),
        );
        let config = line_chart(dates, vec![series]);
        if let Err(e) = self.revenue_chart.refresh(self.ctx.renderer.as_ref(), config) {
            debug!("Revenue chart left empty: {}", e);
        }
    }

    /// # Summary
    /// 绘制 EPS 柱状图。
    ///
    /// # Logic
    /// X 轴沿用营收区块的日期，营收从未加载成功时退回 Q1..Qn。
    fn render_earnings(&mut self, insights: &EarningsInsights) {
        let values = metric_values(insights.eps.as_ref());
        let labels = match &self.revenue {
            Some(trends) => trends.dates.clone(),
            None => period_labels(values.len()),
        };
        let series = ChartSeries::new(
            format!("{} EPS", self.focus_ticker),
            values,
            self.ctx.palette.next_color(),
        );
        let config = bar_chart(labels, series);
        if let Err(e) = self.earnings_chart.refresh(self.ctx.renderer.as_ref(), config) {
            debug!("Earnings chart left empty: {}", e);
        }
    }
}
