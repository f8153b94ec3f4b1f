use finboard_core::gateway::port::FinanceGateway;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 流量模拟随机访问的接口
pub const ENDPOINTS: [&str; 4] = ["/metrics", "/stock/AAPL", "/top-stocks", "/revenue-trends/AAPL"];

/// 单次请求前的最长等待 (秒)
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// 非有限或越界的延迟收敛到 `[0, MAX_DELAY_SECS]`，NaN 记为 0。
fn clamp_delay(secs: f64) -> f64 {
    if secs.is_nan() {
        return 0.0;
    }
    secs.clamp(0.0, MAX_DELAY_SECS)
}

/// # Summary
/// 一次模拟运行的统计。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrafficReport {
    // 收到 2xx 响应的请求数
    pub succeeded: u32,
    // 收到非 2xx 响应的请求数
    pub rejected: u32,
    // 网络失败的请求数
    pub unreachable: u32,
}

/// # Summary
/// 向随机接口发送 GET 请求，模拟真实访问。
///
/// # Logic
/// 1. 每次请求前等待 `[min_delay, max_delay]` 秒内均匀分布的随机时长。
/// 2. 从 `ENDPOINTS` 中随机选择一个接口发出请求。
/// 3. 记录接口、耗时与状态码。
///
/// # Arguments
/// * `gateway` - 请求发送方。
/// * `requests` - 请求总数。
/// * `min_delay`, `max_delay` - 延迟区间 (秒)，顺序颠倒时自动交换；
///   每端先收敛到 `[0, MAX_DELAY_SECS]`，NaN 按 0 处理。
pub async fn simulate(
    gateway: &dyn FinanceGateway,
    requests: u32,
    min_delay: f64,
    max_delay: f64,
) -> TrafficReport {
    let (min_delay, max_delay) = (clamp_delay(min_delay), clamp_delay(max_delay));
    let (lo, hi) = (min_delay.min(max_delay), min_delay.max(max_delay));
    let mut report = TrafficReport::default();

    for i in 1..=requests {
        let (endpoint, delay) = {
            let mut rng = rand::rng();
            let endpoint = ENDPOINTS.choose(&mut rng).copied().unwrap_or("/metrics");
            let delay = if hi > lo { rng.random_range(lo..=hi) } else { lo };
            (endpoint, delay)
        };

        info!("Request {}/{}: waiting {:.2}s", i, requests, delay);
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;

        let started = Instant::now();
        match gateway.probe(endpoint).await {
            Ok(status) => {
                info!(
                    "Endpoint = {}, Response Time = {:.4}s, Status Code = {}",
                    endpoint,
                    started.elapsed().as_secs_f64(),
                    status
                );
                if (200..300).contains(&status) {
                    report.succeeded += 1;
                } else {
                    report.rejected += 1;
                }
            }
            Err(e) => {
                warn!("Endpoint = {} unreachable: {}", endpoint, e);
                report.unreachable += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finboard_core::gateway::error::GatewayError;
    use finboard_core::market::entity::{
        EarningsInsights, HistoricalTopStocks, NewsItem, NewsQuery, Quote, RevenueTrends, TopStocks,
    };
    use finboard_core::portfolio::entity::Position;
    use finboard_core::trade::entity::{
        Balance, LoginReceipt, StockInfo, TradeDirection, TradeReceipt, TradeRequest,
    };
    use std::sync::Mutex;

    /// Answers status checks only; `/metrics` is treated as down.
    #[derive(Default)]
    struct StatusOnly {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl FinanceGateway for StatusOnly {
        fn base_url(&self) -> String {
            "http://mock".into()
        }
        fn set_base_url(&self, _url: &str) {}
        async fn stock_price(&self, _: &str) -> Result<Quote, GatewayError> {
            unimplemented!()
        }
        async fn top_stocks(&self) -> Result<TopStocks, GatewayError> {
            unimplemented!()
        }
        async fn historical_top_stocks(&self) -> Result<HistoricalTopStocks, GatewayError> {
            unimplemented!()
        }
        async fn portfolio(&self) -> Result<Vec<Position>, GatewayError> {
            unimplemented!()
        }
        async fn balance(&self, _: &str) -> Result<Balance, GatewayError> {
            unimplemented!()
        }
        async fn ticker_suggestions(&self, _: &str) -> Result<Vec<String>, GatewayError> {
            unimplemented!()
        }
        async fn stock_info(&self, _: &str) -> Result<StockInfo, GatewayError> {
            unimplemented!()
        }
        async fn trade(
            &self,
            _: TradeDirection,
            _: &TradeRequest,
        ) -> Result<TradeReceipt, GatewayError> {
            unimplemented!()
        }
        async fn revenue_trends(&self, _: &str) -> Result<RevenueTrends, GatewayError> {
            unimplemented!()
        }
        async fn earnings_insights(&self, _: &str) -> Result<EarningsInsights, GatewayError> {
            unimplemented!()
        }
        async fn market_news(&self, _: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError> {
            unimplemented!()
        }
        async fn metrics(&self) -> Result<String, GatewayError> {
            unimplemented!()
        }
        async fn login(&self, _: &str, _: &str) -> Result<LoginReceipt, GatewayError> {
            unimplemented!()
        }
        async fn probe(&self, path: &str) -> Result<u16, GatewayError> {
            self.seen.lock().unwrap().push(path.to_string());
            if path == "/metrics" {
                Err(GatewayError::Network("connection refused".into()))
            } else {
                Ok(200)
            }
        }
    }

    #[tokio::test]
    async fn test_simulate_hits_known_endpoints() {
        let gateway = StatusOnly::default();

        let report = simulate(&gateway, 20, 0.0, 0.0).await;

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 20);
        assert!(seen.iter().all(|p| ENDPOINTS.contains(&p.as_str())));
        let metrics_hits = u32::try_from(seen.iter().filter(|p| *p == "/metrics").count()).unwrap();
        assert_eq!(report.unreachable, metrics_hits);
        assert_eq!(report.succeeded + report.unreachable, 20);
        assert_eq!(report.rejected, 0);
    }

    #[test]
    fn test_clamp_delay_bounds() {
        assert_eq!(clamp_delay(f64::NAN), 0.0);
        assert_eq!(clamp_delay(-3.0), 0.0);
        assert_eq!(clamp_delay(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_delay(f64::INFINITY), MAX_DELAY_SECS);
        assert_eq!(clamp_delay(1e300), MAX_DELAY_SECS);
        assert_eq!(clamp_delay(2.5), 2.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_survives_unbounded_delays() {
        let gateway = StatusOnly::default();

        let report = simulate(&gateway, 3, 0.0, f64::INFINITY).await;
        assert_eq!(report.succeeded + report.unreachable, 3);

        let report = simulate(&gateway, 3, f64::NAN, -5.0).await;
        assert_eq!(report.succeeded + report.unreachable, 3);

        let report = simulate(&gateway, 2, f64::MAX, f64::MAX).await;
        assert_eq!(report.succeeded + report.unreachable, 2);
        assert_eq!(gateway.seen.lock().unwrap().len(), 8);
    }
}
