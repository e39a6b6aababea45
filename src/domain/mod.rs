// ==========================================
// 用户批量导入引擎 - 领域模型层
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 2. 数据模型
// ==========================================
// 职责: 定义导入领域实体与结果类型
// 红线: 不含解析逻辑,不含网关访问逻辑
// ==========================================

pub mod user;

// 重导出核心类型
pub use user::{
    BatchResult, CandidateUser, ImportOutcome, ImportReport, ImportedUser, RawRow, RowDiagnostic,
    ValidationOutcome,
};
