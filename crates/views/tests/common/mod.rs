#![allow(dead_code)]

use async_trait::async_trait;
use finboard_chart::{FixedPalette, TerminalRenderer};
use finboard_core::config::AppConfig;
use finboard_core::gateway::error::GatewayError;
use finboard_core::gateway::port::FinanceGateway;
use finboard_core::market::entity::{
    EarningsInsights, HistoricalTopStocks, NewsItem, NewsQuery, PriceHistory, Quote,
    RevenueTrends, TopStocks,
};
use finboard_core::portfolio::entity::Position;
use finboard_core::trade::entity::{
    Balance, LoginReceipt, StockInfo, TradeDirection, TradeReceipt, TradeRequest,
};
use finboard_store::MemorySettingsStore;
use finboard_views::AppContext;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the remote API.
pub struct MockGateway {
    pub base_url: Mutex<String>,
    pub shares_owned: Mutex<u32>,
    pub trades: Mutex<Vec<(TradeDirection, TradeRequest)>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub quote_override: Mutex<Option<Quote>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            base_url: Mutex::new("http://localhost:5000".to_string()),
            shares_owned: Mutex::new(10),
            trades: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            quote_override: Mutex::new(None),
        }
    }

    /// Serves `quote` from `stock_price` instead of the default two-price quote.
    pub fn serve_quote(&self, quote: Quote) {
        *self.quote_override.lock().unwrap() = Some(quote);
    }

    /// Makes every call to `operation` fail with HTTP 500.
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    fn check(&self, operation: &'static str) -> Result<(), GatewayError> {
        if self.failing.lock().unwrap().contains(operation) {
            return Err(GatewayError::Http {
                status: 500,
                message: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FinanceGateway for MockGateway {
    fn base_url(&self) -> String {
        self.base_url.lock().unwrap().clone()
    }

    fn set_base_url(&self, url: &str) {
        *self.base_url.lock().unwrap() = url.to_string();
    }

    async fn stock_price(&self, ticker: &str) -> Result<Quote, GatewayError> {
        self.check("stock_price")?;
        if let Some(quote) = self.quote_override.lock().unwrap().clone() {
            return Ok(quote);
        }
        Ok(Quote {
            ticker: ticker.to_string(),
            current_price: 110.0,
            history: PriceHistory {
                dates: vec!["2024-08-29".into(), "2024-08-30".into()],
                prices: vec![100.0, 110.0],
            },
            volume: vec![100.0, 200.0, 300.0],
        })
    }

    async fn top_stocks(&self) -> Result<TopStocks, GatewayError> {
        self.check("top_stocks")?;
        Ok(serde_json_like_top())
    }

    async fn historical_top_stocks(&self) -> Result<HistoricalTopStocks, GatewayError> {
        self.check("historical_top_stocks")?;
        let mut data = BTreeMap::new();
        data.insert("AAPL".to_string(), vec![190.0, 192.0]);
        data.insert("MSFT".to_string(), vec![410.0, 415.0]);
        Ok(HistoricalTopStocks {
            dates: vec!["2024-08-29".into(), "2024-08-30".into()],
            data,
        })
    }

    async fn portfolio(&self) -> Result<Vec<Position>, GatewayError> {
        self.check("portfolio")?;
        Ok(vec![Position {
            ticker: "AAPL".into(),
            shares: 5,
            purchase_price: 10.0,
            current_price: 12.0,
        }])
    }

    async fn balance(&self, _username: &str) -> Result<Balance, GatewayError> {
        self.check("balance")?;
        Ok(Balance {
            balance: dec!(2500.75),
        })
    }

    async fn ticker_suggestions(&self, query: &str) -> Result<Vec<String>, GatewayError> {
        self.check("ticker_suggestions")?;
        Ok(["AAPL", "AMZN", "MSFT"]
            .iter()
            .filter(|t| t.starts_with(&query.to_uppercase()))
            .map(|t| t.to_string())
            .collect())
    }

    async fn stock_info(&self, _ticker: &str) -> Result<StockInfo, GatewayError> {
        self.check("stock_info")?;
        Ok(StockInfo {
            current_price: 150.0,
            shares_owned: *self.shares_owned.lock().unwrap(),
        })
    }

    async fn trade(
        &self,
        direction: TradeDirection,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, GatewayError> {
        self.check("trade")?;
        self.trades.lock().unwrap().push((direction, request.clone()));
        let mut owned = self.shares_owned.lock().unwrap();
        match direction {
            TradeDirection::Buy => *owned += request.shares,
            TradeDirection::Sell => *owned = owned.saturating_sub(request.shares),
        }
        Ok(TradeReceipt {
            message: Some("Transaction successful".into()),
            ..Default::default()
        })
    }

    async fn revenue_trends(&self, _ticker: &str) -> Result<RevenueTrends, GatewayError> {
        self.check("revenue_trends")?;
        Ok(serde_json::from_str(r#"{"dates": ["2023", "2024"], "revenue": [383.3, "391.0"]}"#)
            .unwrap())
    }

    async fn earnings_insights(&self, _ticker: &str) -> Result<EarningsInsights, GatewayError> {
        self.check("earnings_insights")?;
        Ok(serde_json::from_str(r#"{"EPS": ["6.13", "6.42"], "ProfitMargin": "24.3%"}"#).unwrap())
    }

    async fn market_news(&self, _query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError> {
        self.check("market_news")?;
        Ok(serde_json::from_str(
            r#"[{"title": "Apple beats", "content": "...", "posted_on": "2024-08-30 14:30:00", "tickers": "AAPL"}]"#,
        )
        .unwrap())
    }

    async fn metrics(&self) -> Result<String, GatewayError> {
        self.check("metrics")?;
        Ok("requests_total 1\n".to_string())
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginReceipt, GatewayError> {
        self.check("login")?;
        if username == "alice" && password == "secret" {
            Ok(LoginReceipt {
                message: Some("Login successful".into()),
                user: Some(username.to_string()),
            })
        } else {
            Err(GatewayError::Http {
                status: 401,
                message: "Invalid credentials".into(),
            })
        }
    }

    async fn probe(&self, _path: &str) -> Result<u16, GatewayError> {
        Ok(200)
    }
}

fn serde_json_like_top() -> TopStocks {
    serde_json::from_str(r#"{"AAPL": 192.0, "MSFT": {"2024-08-29": 410.0, "2024-08-30": 415.0}}"#)
        .unwrap()
}

pub struct Harness {
    pub ctx: AppContext,
    pub gateway: Arc<MockGateway>,
    pub renderer: Arc<TerminalRenderer>,
}

pub fn harness() -> Harness {
    let gateway = Arc::new(MockGateway::new());
    let renderer = Arc::new(TerminalRenderer::new());
    let ctx = AppContext::new(
        gateway.clone(),
        Arc::new(MemorySettingsStore::new("http://localhost:5000")),
        renderer.clone(),
        Arc::new(FixedPalette::new(["#111111", "#222222", "#333333"])),
        AppConfig::default(),
    );
    Harness {
        ctx,
        gateway,
        renderer,
    }
}
