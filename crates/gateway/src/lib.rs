//! # `finboard-gateway` - 远端数据网关
//!
//! 基于 `reqwest` 实现 `FinanceGateway` 端口，每个外部资源对应一个方法。

pub mod http;
