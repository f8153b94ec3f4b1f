use thiserror::Error;

/// # Summary
/// 远端数据网关错误枚举，处理网络、HTTP 状态与解析等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 网关自身不做重试，错误原样交由调用方呈现。
#[derive(Error, Debug)]
pub enum GatewayError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 服务端返回非 2xx 状态，message 取自响应体中的 message/error 字段
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    // 响应体解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 基础地址无法解析
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// # Summary
    /// 提取适合展示给用户的错误说明。
    ///
    /// # Logic
    /// 1. HTTP 错误直接返回服务端给出的说明。
    /// 2. 其余错误返回完整的错误描述。
    pub fn message(&self) -> String {
        match self {
            GatewayError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
