use crate::context::AppContext;
use finboard_core::common::normalize_ticker;
use finboard_core::gateway::error::GatewayError;
use finboard_core::trade::entity::{StockInfo, TradeDirection, TradeReceipt, TradeRequest};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// # Summary
/// 一次买卖操作的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    // 未选择标的或股数为 0，请求未发出
    Ignored,
    // 服务端接受了请求
    Completed(TradeReceipt),
    // 服务端拒绝或网络失败，附带展示给用户的消息
    Failed(String),
}

/// # Summary
/// 交易视图：搜索 -> 选择 -> 查看标的 -> 输入股数 -> 买入/卖出。
///
/// # Invariants
/// - 成交成功后通过显式的 `refresh` 重新拉取标的信息与余额。
/// - 成交失败时不修改已有的标的信息。
/// - 仅在已登录时查询余额。
pub struct TradeView {
    ctx: AppContext,
    pub query: String,
    pub suggestions: Vec<String>,
    pub selected: Option<String>,
    pub stock_info: Option<StockInfo>,
    pub shares: u32,
    pub balance: Option<Decimal>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl TradeView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            query: String::new(),
            suggestions: Vec::new(),
            selected: None,
            stock_info: None,
            shares: 0,
            balance: None,
            message: None,
            error: None,
        }
    }

    /// # Summary
    /// 根据输入查询股票代码建议。
    ///
    /// # Logic
    /// 1. 去除空白后为空则清空建议列表，不发请求。
    /// 2. 查询失败时同样清空建议列表。
    pub async fn search(&mut self, query: &str) {
        self.query = query.trim().to_string();
        if self.query.is_empty() {
            self.suggestions.clear();
            return;
        }

        match self.ctx.gateway.ticker_suggestions(&self.query).await {
            Ok(list) => {
                debug!("{} suggestion(s) for {}", list.len(), self.query);
                self.suggestions = list;
            }
            Err(e) => {
                warn!("Ticker suggestions failed for {}: {}", self.query, e);
                self.suggestions.clear();
            }
        }
    }

    /// # Summary
    /// 选中一个标的并加载其信息。
    ///
    /// # Arguments
    /// * `ticker`: 候选列表中的代码，空白输入被忽略。
    pub async fn select(&mut self, ticker: &str) {
        let Some(ticker) = normalize_ticker(ticker) else {
            return;
        };
        self.selected = Some(ticker);
        self.suggestions.clear();
        self.stock_info = None;
        self.message = None;
        self.refresh().await;
    }

    pub fn set_shares(&mut self, shares: u32) {
        self.shares = shares;
    }

    /// # Summary
    /// 重新拉取选中标的的信息与账户余额。
    ///
    /// # Logic
    /// 1. 已选中标的时拉取标的信息，失败时保留旧信息并记录错误。
    /// 2. 已登录时拉取余额。
    pub async fn refresh(&mut self) {
        if let Some(ticker) = self.selected.clone() {
            match self.ctx.gateway.stock_info(&ticker).await {
                Ok(info) => {
                    self.stock_info = Some(info);
                    self.error = None;
                }
                Err(e) => {
                    warn!("Failed to load stock info for {}: {}", ticker, e);
                    self.error = Some(format!("Failed to load {}: {}", ticker, e.message()));
                }
            }
        }

        let username = match self.ctx.store.username().await {
            Ok(name) => name,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                None
            }
        };
        if let Some(username) = username {
            match self.ctx.gateway.balance(&username).await {
                Ok(balance) => self.balance = Some(balance.balance),
                Err(e) => warn!("Failed to load balance for {}: {}", username, e),
            }
        }
    }

    /// # Summary
    /// 发出一次买卖请求，不做后续刷新。
    ///
    /// # Logic
    /// 1. 未选中标的或股数为 0 时直接返回 `Ignored`。
    /// 2. 请求体携带配置中的用户标识。
    /// 3. 成功时展示固定文案 `Purchase successful` / `Sale successful`，服务端消息留在回执中；失败时展示 `Purchase failed: ...` / `Sale failed: ...`。
    pub async fn execute_trade(&mut self, direction: TradeDirection) -> TradeOutcome {
        let Some(ticker) = self.selected.clone() else {
            return TradeOutcome::Ignored;
        };
        if self.shares == 0 {
            return TradeOutcome::Ignored;
        }

        let request = TradeRequest {
            ticker,
            shares: self.shares,
            user_id: self.ctx.config.trade.user_id.clone(),
        };

        match self.ctx.gateway.trade(direction, &request).await {
            Ok(receipt) => {
                info!(
                    "{} {} share(s) of {} accepted",
                    direction, request.shares, request.ticker
                );
                self.message = Some(success_message(direction).to_string());
                TradeOutcome::Completed(receipt)
            }
            Err(e) => {
                warn!("{} of {} failed: {}", direction, request.ticker, e);
                let text = failure_message(direction, &e);
                self.message = Some(text.clone());
                TradeOutcome::Failed(text)
            }
        }
    }

    /// 买入，成功后刷新。
    pub async fn buy(&mut self) -> TradeOutcome {
        self.trade_and_refresh(TradeDirection::Buy).await
    }

    /// 卖出，成功后刷新。
    pub async fn sell(&mut self) -> TradeOutcome {
        self.trade_and_refresh(TradeDirection::Sell).await
    }

    async fn trade_and_refresh(&mut self, direction: TradeDirection) -> TradeOutcome {
        let outcome = self.execute_trade(direction).await;
        if matches!(outcome, TradeOutcome::Completed(_)) {
            self.refresh().await;
        }
        outcome
    }
}

fn success_message(direction: TradeDirection) -> &'static str {
    match direction {
        TradeDirection::Buy => "Purchase successful",
        TradeDirection::Sell => "Sale successful",
    }
}

fn failure_message(direction: TradeDirection, e: &GatewayError) -> String {
    match direction {
        TradeDirection::Buy => format!("Purchase failed: {}", e.message()),
        TradeDirection::Sell => format!("Sale failed: {}", e.message()),
    }
}
