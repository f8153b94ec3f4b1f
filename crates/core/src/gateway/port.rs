use crate::gateway::error::GatewayError;
use crate::market::entity::{
    EarningsInsights, HistoricalTopStocks, NewsItem, NewsQuery, Quote, RevenueTrends, TopStocks,
};
use crate::portfolio::entity::Position;
use crate::trade::entity::{
    Balance, LoginReceipt, StockInfo, TradeDirection, TradeReceipt, TradeRequest,
};
use async_trait::async_trait;

/// # Summary
/// 远端数据网关接口 (Port)，所有服务端数据都经由此处获取。
///
/// # Invariants
/// - 每个方法只发出一次 HTTP 请求，不做重试、缓存或批量合并。
/// - 返回值为服务端负载的直接解码结果，不做业务层转换。
/// - 股票代码的非空校验由调用方负责。
#[async_trait]
pub trait FinanceGateway: Send + Sync {
    /// # Summary
    /// 获取当前使用的基础地址。
    fn base_url(&self) -> String;

    /// # Summary
    /// 替换基础地址，后续请求立即生效。
    ///
    /// # Arguments
    /// * `url`: 新的基础地址。
    fn set_base_url(&self, url: &str);

    /// # Summary
    /// 获取单只股票的行情快照。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码。
    ///
    /// # Returns
    /// 成功返回 `Quote`，失败返回 `GatewayError`。
    async fn stock_price(&self, ticker: &str) -> Result<Quote, GatewayError>;

    /// 获取热门股票的最新价格快照。
    async fn top_stocks(&self) -> Result<TopStocks, GatewayError>;

    /// 获取热门股票的历史收盘价。
    async fn historical_top_stocks(&self) -> Result<HistoricalTopStocks, GatewayError>;

    /// 获取投资组合持仓列表。
    async fn portfolio(&self) -> Result<Vec<Position>, GatewayError>;

    /// # Summary
    /// 查询账户余额。
    ///
    /// # Arguments
    /// * `username`: 已登录的用户名。
    async fn balance(&self, username: &str) -> Result<Balance, GatewayError>;

    /// # Summary
    /// 股票代码自动补全。
    ///
    /// # Arguments
    /// * `query`: 用户输入的前缀，调用方保证非空。
    async fn ticker_suggestions(&self, query: &str) -> Result<Vec<String>, GatewayError>;

    /// 获取交易界面所需的标的信息。
    async fn stock_info(&self, ticker: &str) -> Result<StockInfo, GatewayError>;

    /// # Summary
    /// 提交买入或卖出请求。
    ///
    /// # Logic
    /// 1. 根据方向选择 `/buy` 或 `/sell`。
    /// 2. 以 JSON 形式提交 `TradeRequest`。
    ///
    /// # Arguments
    /// * `direction`: 交易方向。
    /// * `request`: 请求体。
    ///
    /// # Returns
    /// 成功返回服务端回执。
    async fn trade(
        &self,
        direction: TradeDirection,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, GatewayError>;

    /// 获取营收趋势。
    async fn revenue_trends(&self, ticker: &str) -> Result<RevenueTrends, GatewayError>;

    /// 获取盈利概览。
    async fn earnings_insights(&self, ticker: &str) -> Result<EarningsInsights, GatewayError>;

    /// 按条件获取市场新闻。
    async fn market_news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError>;

    /// 获取服务端的纯文本指标。
    async fn metrics(&self) -> Result<String, GatewayError>;

    /// # Summary
    /// 使用用户名与密码登录。
    ///
    /// # Returns
    /// 凭据有效时返回登录回执，否则返回 `GatewayError::Http`。
    async fn login(&self, username: &str, password: &str) -> Result<LoginReceipt, GatewayError>;

    /// # Summary
    /// 对任意路径发起 GET 请求并返回状态码，供流量模拟使用。
    ///
    /// # Arguments
    /// * `path`: 以 `/` 开头的相对路径。
    ///
    /// # Returns
    /// 只要收到响应即返回其状态码，网络失败时返回错误。
    async fn probe(&self, path: &str) -> Result<u16, GatewayError>;
}
