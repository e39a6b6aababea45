// ==========================================
// 用户批量导入引擎 - 配置层
// ==========================================
// 依据: Admin_Console_API_v0.1.md - 服务端地址约定
// ==========================================
// 职责: 网关端点配置,支持环境变量覆写
// ==========================================

use serde::{Deserialize, Serialize};

/// 默认 bulk-import 端点(本地开发环境)
pub const DEFAULT_BULK_IMPORT_ENDPOINT: &str = "http://127.0.0.1:8000/api/user/bulk-import";

/// 覆写端点的环境变量名
pub const GATEWAY_URL_ENV: &str = "BULK_IMPORT_GATEWAY_URL";

// ==========================================
// GatewayConfig - 提交网关配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String, // bulk-import 完整 URL
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BULK_IMPORT_ENDPOINT.to_string(),
        }
    }
}

impl GatewayConfig {
    /// 从环境变量读取配置,未设置时回落到默认端点
    pub fn from_env() -> Self {
        match std::env::var(GATEWAY_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self { endpoint: url },
            _ => Self::default(),
        }
    }
}
