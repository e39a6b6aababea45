// ==========================================
// 用户批量导入引擎 - 提交网关层
// ==========================================
// 依据: Admin_Console_API_v0.1.md - bulk-import 接口
// ==========================================
// 职责: 定义提交网关契约并提供 HTTP 实现
// 红线: 不重试,不拆分批次重提;响应按提交顺序位置对齐
// ==========================================

pub mod error;
pub mod http;

pub use error::GatewayError;
pub use http::HttpSubmissionGateway;

use crate::domain::user::{CandidateUser, ImportedUser};
use async_trait::async_trait;
use std::collections::BTreeMap;

// ==========================================
// SubmissionReport - 网关响应(二择一)
// ==========================================
#[derive(Debug, Clone)]
pub enum SubmissionReport {
    /// 整批落库成功,回显已持久化的用户
    Accepted { users: Vec<ImportedUser> },
    /// 整批被拒,每条提交记录一个 字段→消息 映射
    /// (与提交序列按位置对齐)
    Rejected { errors: Vec<BTreeMap<String, String>> },
}

// ==========================================
// SubmissionGateway Trait
// ==========================================
// 用途: 账户创建服务的抽象(外部协作方)
// 实现者: HttpSubmissionGateway;测试中使用 Mock
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// 提交一个已通过闸门的完整批次
    ///
    /// # 返回
    /// - Ok(SubmissionReport): 服务端的结构化成功/失败报告
    /// - Err(GatewayError): 网络或响应解码失败
    async fn submit_users(&self, users: &[CandidateUser]) -> Result<SubmissionReport, GatewayError>;
}
