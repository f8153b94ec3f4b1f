use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// # Summary
/// 交易方向定义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    /// 买入
    Buy,
    /// 卖出
    Sell,
}

impl TradeDirection {
    /// 对应的 API 路径段
    pub fn path(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// # Summary
/// 买卖请求体。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeRequest {
    pub ticker: String,
    pub shares: u32,
    pub user_id: String,
}

/// # Summary
/// 服务端返回的成交回执，除 `message` 外的字段原样保留。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TradeReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// # Summary
/// 交易界面展示的标的信息：当前价与已持有股数。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StockInfo {
    #[serde(alias = "currentPrice")]
    pub current_price: f64,
    #[serde(alias = "sharesOwned")]
    pub shares_owned: u32,
}

/// # Summary
/// 账户可用余额。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub balance: Decimal,
}

/// # Summary
/// 登录请求体。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// # Summary
/// 登录成功回执。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_info_accepts_camel_case() {
        let info: StockInfo =
            serde_json::from_str(r#"{"currentPrice": 150.25, "sharesOwned": 12}"#).unwrap();
        assert_eq!(info.current_price, 150.25);
        assert_eq!(info.shares_owned, 12);
    }

    #[test]
    fn test_balance_from_number() {
        let balance: Balance = serde_json::from_str(r#"{"balance": 1000.5}"#).unwrap();
        assert_eq!(balance.balance, dec!(1000.5));
    }

    #[test]
    fn test_trade_receipt_keeps_extra_fields() {
        let receipt: TradeReceipt =
            serde_json::from_str(r#"{"message": "ok", "new_balance": 10}"#).unwrap();
        assert_eq!(receipt.message.as_deref(), Some("ok"));
        assert!(receipt.extra.contains_key("new_balance"));
    }
}
