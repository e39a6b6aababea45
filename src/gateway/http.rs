// ==========================================
// 用户批量导入引擎 - HTTP 提交网关实现
// ==========================================
// 依据: Admin_Console_API_v0.1.md - POST /api/user/bulk-import
// ==========================================
// 请求: 候选用户 JSON 数组
// 响应: {success: true, users: [...]}
//       或 {success: false, errors: [{字段: 消息, ...}, ...]}
// ==========================================

use crate::config::GatewayConfig;
use crate::domain::user::{CandidateUser, ImportedUser};
use crate::gateway::{GatewayError, SubmissionGateway, SubmissionReport};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

// bulk-import 响应体
#[derive(Debug, Deserialize)]
struct BulkImportResponse {
    success: bool,
    #[serde(default)]
    users: Vec<ImportedUser>,
    #[serde(default)]
    errors: Vec<BTreeMap<String, String>>,
}

// ==========================================
// HttpSubmissionGateway
// ==========================================
pub struct HttpSubmissionGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit_users(
        &self,
        users: &[CandidateUser],
    ) -> Result<SubmissionReport, GatewayError> {
        debug!(count = users.len(), endpoint = %self.endpoint, "submitting batch to gateway");

        let response = self
            .client
            .post(&self.endpoint)
            .json(users)
            .send()
            .await?;

        // 4xx 时服务端仍可能返回结构化 errors,先尝试解码响应体,
        // 解码不出来再按状态码归为传输层失败
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<BulkImportResponse>(&body) {
            Ok(parsed) if parsed.success => Ok(SubmissionReport::Accepted {
                users: parsed.users,
            }),
            Ok(parsed) => Ok(SubmissionReport::Rejected {
                errors: parsed.errors,
            }),
            Err(_) if !status.is_success() => {
                Err(GatewayError::Transport(format!("HTTP {}", status)))
            }
            Err(e) => Err(GatewayError::InvalidResponse(e.to_string())),
        }
    }
}
