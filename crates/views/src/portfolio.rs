use crate::analytics::portfolio_totals;
use crate::context::AppContext;
use finboard_core::portfolio::entity::{PortfolioTotals, Position};
use tracing::warn;

/// # Summary
/// 投资组合视图：持仓列表与客户端汇总。
pub struct PortfolioView {
    ctx: AppContext,
    pub positions: Vec<Position>,
    pub totals: PortfolioTotals,
    pub error: Option<String>,
}

impl PortfolioView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            positions: Vec::new(),
            totals: PortfolioTotals::default(),
            error: None,
        }
    }

    /// 拉取持仓并重新计算汇总，失败时保留上一次的结果。
    pub async fn load(&mut self) {
        match self.ctx.gateway.portfolio().await {
            Ok(positions) => {
                self.totals = portfolio_totals(&positions);
                self.positions = positions;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to load portfolio: {}", e);
                self.error = Some(format!("Failed to load portfolio: {}", e.message()));
            }
        }
    }
}
