use async_trait::async_trait;
use finboard_core::gateway::error::GatewayError;
use finboard_core::gateway::port::FinanceGateway;
use finboard_core::market::entity::{
    EarningsInsights, HistoricalTopStocks, NewsItem, NewsQuery, Quote, RevenueTrends, TopStocks,
};
use finboard_core::portfolio::entity::Position;
use finboard_core::trade::entity::{
    Balance, LoginReceipt, LoginRequest, StockInfo, TradeDirection, TradeReceipt, TradeRequest,
};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, warn};

/// # Summary
/// A `FinanceGateway` implementation that talks to the dashboard REST API over HTTP.
///
/// # Invariants
/// * Every operation issues exactly one request; nothing is retried or cached.
/// * The base URL can be swapped at runtime and applies to the next request.
pub struct HttpGateway {
    /// The HTTP client used for requests.
    client: Client,
    /// Base URL without a trailing slash, e.g. `http://localhost:5000`.
    base_url: RwLock<String>,
}

impl HttpGateway {
    /// # Summary
    /// Creates a new `HttpGateway`.
    ///
    /// # Logic
    /// 1. Installs the `ring` rustls provider unless one is already registered.
    /// 2. Builds a reqwest client with the given request timeout.
    ///
    /// # Arguments
    /// * `base_url` - The API root, e.g. `http://localhost:5000`.
    /// * `timeout` - Per-request timeout.
    ///
    /// # Returns
    /// * `Ok(HttpGateway)` on success.
    /// * `Err(GatewayError::Network)` if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            debug!("rustls crypto provider already installed");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: RwLock::new(trim_base(base_url)),
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let base = self.base_url();
        let mut url =
            Url::parse(&base).map_err(|e| GatewayError::InvalidUrl(format!("{base}: {e}")))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| GatewayError::InvalidUrl(base.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// # Summary
    /// Sends a request and turns non-2xx responses into `GatewayError::Http`.
    ///
    /// # Logic
    /// 1. Transport failures map to `GatewayError::Network`.
    /// 2. For error statuses, the JSON body's `message` or `error` field becomes the
    ///    error message, falling back to the status reason phrase.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        warn!("{} returned HTTP {}: {}", url, status.as_u16(), message);

        Err(GatewayError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Parse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.execute(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, GatewayError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::decode(response).await
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Pulls a human-readable message out of an error body like `{"error": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
impl FinanceGateway for HttpGateway {
    fn base_url(&self) -> String {
        match self.base_url.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_base_url(&self, url: &str) {
        let trimmed = trim_base(url);
        debug!("Switching API base URL to {}", trimmed);
        match self.base_url.write() {
            Ok(mut guard) => *guard = trimmed,
            Err(poisoned) => *poisoned.into_inner() = trimmed,
        }
    }

    async fn stock_price(&self, ticker: &str) -> Result<Quote, GatewayError> {
        self.get_json(&["stock", ticker]).await
    }

    async fn top_stocks(&self) -> Result<TopStocks, GatewayError> {
        self.get_json(&["top-stocks"]).await
    }

    async fn historical_top_stocks(&self) -> Result<HistoricalTopStocks, GatewayError> {
        self.get_json(&["top-stocks", "historical"]).await
    }

    async fn portfolio(&self) -> Result<Vec<Position>, GatewayError> {
        self.get_json(&["portfolio"]).await
    }

    async fn balance(&self, username: &str) -> Result<Balance, GatewayError> {
        self.get_json(&["balance", username]).await
    }

    async fn ticker_suggestions(&self, query: &str) -> Result<Vec<String>, GatewayError> {
        self.get_json(&["ticker-suggestions", query]).await
    }

    async fn stock_info(&self, ticker: &str) -> Result<StockInfo, GatewayError> {
        self.get_json(&["stock-info", ticker]).await
    }

    /// # Summary
    /// Posts a buy or sell order.
    ///
    /// # Logic
    /// The direction selects `/buy` or `/sell`; the request body is sent as JSON as-is.
    async fn trade(
        &self,
        direction: TradeDirection,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, GatewayError> {
        self.post_json(&[direction.path()], request).await
    }

    async fn revenue_trends(&self, ticker: &str) -> Result<RevenueTrends, GatewayError> {
        self.get_json(&["revenue-trends", ticker]).await
    }

    async fn earnings_insights(&self, ticker: &str) -> Result<EarningsInsights, GatewayError> {
        self.get_json(&["earnings-insights", ticker]).await
    }

    async fn market_news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError> {
        let url = self.endpoint(&["market-news"])?;
        let params = query.to_params();
        debug!("GET {} {:?}", url, params);
        let response = self.execute(self.client.get(url).query(&params)).await?;
        Self::decode(response).await
    }

    /// # Summary
    /// Fetches the plain-text metrics exposition.
    ///
    /// # Returns
    /// * The raw response body, untouched.
    async fn metrics(&self) -> Result<String, GatewayError> {
        let url = self.endpoint(&["metrics"])?;
        debug!("GET {}", url);
        let response = self.execute(self.client.get(url)).await?;
        response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginReceipt, GatewayError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_json(&["login"], &request).await
    }

    /// # Summary
    /// Issues a bare GET and reports the status code, success or not.
    ///
    /// # Arguments
    /// * `path` - A path such as `/stock/AAPL`.
    ///
    /// # Returns
    /// * `Ok(status)` whenever a response arrives.
    /// * `Err(GatewayError::Network)` if the server cannot be reached.
    async fn probe(&self, path: &str) -> Result<u16, GatewayError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.endpoint(&segments)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(response.status().as_u16())
    }
}
