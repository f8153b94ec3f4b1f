use serde::{Deserialize, Serialize};

/// # Summary
/// 投资组合中的单个持仓。
///
/// # Invariants
/// - `shares` 非负。
/// - `purchase_price` 为买入成本价，`current_price` 为最新价。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    // 股票代码
    pub ticker: String,
    // 持有股数
    pub shares: u32,
    // 买入价
    pub purchase_price: f64,
    // 当前价
    pub current_price: f64,
}

/// # Summary
/// 投资组合汇总结果，仅在客户端计算，不做持久化。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PortfolioTotals {
    // 总投入 = Σ 买入价 × 股数
    pub total_investment: f64,
    // 总市值 = Σ 当前价 × 股数
    pub total_value: f64,
    // 总盈亏 = 总市值 - 总投入
    pub total_profit: f64,
    // 盈亏百分比，总投入为 0 时无定义
    pub profit_percent: Option<f64>,
}
