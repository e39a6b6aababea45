// ==========================================
// 用户批量导入引擎 - 网关错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 提交网关错误类型
///
/// Transport 覆盖连接/超时等网络层失败,向调用方只呈现
/// 单条通用消息,不做任何部分成功假设。
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Error importing users: {0}")]
    Transport(String),

    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
