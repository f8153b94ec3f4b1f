//! # `finboard-core` - 领域核心
//!
//! 定义仪表盘客户端的实体、端口 (Port) 与错误枚举。
//! 本 crate 不包含任何 I/O 实现，具体适配器分别位于
//! `finboard-gateway`、`finboard-store` 与 `finboard-chart`。

pub mod chart;
pub mod common;
pub mod config;
pub mod gateway;
pub mod market;
pub mod portfolio;
pub mod store;
pub mod trade;
