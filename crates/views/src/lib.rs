//! # `finboard-views` - 视图模型
//!
//! 每个视图持有自己的局部状态，通过 `AppContext` 调用网关与存储，
//! 并把返回结果转换为可展示的数据与图表。

pub mod analytics;
pub mod context;
pub mod dashboard;
pub mod portfolio;
pub mod session;
pub mod settings;
pub mod stocks;
pub mod trade;

pub use context::AppContext;
