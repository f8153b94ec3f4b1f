use crate::analytics::{average_volume, percent_change};
use crate::context::AppContext;
use finboard_chart::ChartSlot;
use finboard_chart::series::{placeholder_chart, price_chart};
use finboard_core::common::normalize_ticker;
use finboard_core::market::entity::Quote;
use tracing::{debug, info, warn};

/// 个股价格图表所在画布
pub const STOCK_CANVAS: &str = "stockChart";

/// # Summary
/// 个股视图：查询单只股票并绘制价格走势。
///
/// # Invariants
/// - 挂载后、数据到达前展示占位图表，价格与涨跌幅为 0。
/// - 价格不足两个时涨跌幅无定义，记为 `None`。
/// - 每次成功查询都整体替换行情与图表。
pub struct StocksView {
    ctx: AppContext,
    pub ticker: String,
    pub quote: Option<Quote>,
    pub current_price: f64,
    pub change_percent: Option<f64>,
    pub average_volume: f64,
    pub error: Option<String>,
    chart: ChartSlot,
}

impl StocksView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            ticker: String::new(),
            quote: None,
            current_price: 0.0,
            change_percent: Some(0.0),
            average_volume: 0.0,
            error: None,
            chart: ChartSlot::new(STOCK_CANVAS),
        }
    }

    /// 挂载视图，展示占位图表。
    pub fn mount(&mut self) {
        self.current_price = 0.0;
        self.change_percent = Some(0.0);
        if let Err(e) = self
            .chart
            .show_placeholder(self.ctx.renderer.as_ref(), placeholder_chart())
        {
            debug!("Stock placeholder not shown: {}", e);
        }
    }

    /// # Summary
    /// 查询股票行情并刷新图表。
    ///
    /// # Logic
    /// 1. 规范化代码，空输入直接忽略。
    /// 2. 拉取行情，失败时记录错误并保留旧数据。
    /// 3. 计算涨跌幅 (不足两个价格时为 `None`) 与平均成交量。
    /// 4. 销毁旧图表并按新数据重建。
    pub async fn fetch(&mut self, raw_ticker: &str) {
        let Some(ticker) = normalize_ticker(raw_ticker) else {
            return;
        };
        self.ticker = ticker.clone();

        let quote = match self.ctx.gateway.stock_price(&ticker).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Failed to load quote for {}: {}", ticker, e);
                self.error = Some(format!("Failed to load {}: {}", ticker, e.message()));
                return;
            }
        };

        self.error = None;
        self.current_price = quote.current_price;
        self.change_percent = percent_change(&quote.history.prices);
        self.average_volume = average_volume(&quote.volume);
        match self.change_percent {
            Some(change) => info!(
                "Loaded {} at {:.2} ({:+.2}%)",
                ticker, self.current_price, change
            ),
            None => info!("Loaded {} at {:.2} (change n/a)", ticker, self.current_price),
        }

        let config = price_chart(
            &ticker,
            quote.history.dates.clone(),
            quote.history.prices.clone(),
            self.ctx.palette.next_color(),
        );
        if let Err(e) = self.chart.refresh(self.ctx.renderer.as_ref(), config) {
            debug!("Stock chart left empty: {}", e);
        }
        self.quote = Some(quote);
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }
}
