// ==========================================
// 用户批量导入引擎 - 用户领域模型
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 2. 数据模型
// 依据: Admin_Console_API_v0.1.md - bulk-import 接口
// ==========================================
// 红线: 所有实体仅存活于单次导入调用内,不做持久化
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ==========================================
// RawRow - 原始行记录
// ==========================================
// 用途: 解析层输出,列名 → 单元格值(已 TRIM)
// 说明: 使用 BTreeMap 保证序列化输出稳定(诊断消息中
//       会嵌入行内容,两次导入必须产生相同文本)
pub type RawRow = BTreeMap<String, String>;

// ==========================================
// CandidateUser - 候选用户记录
// ==========================================
// 用途: 行校验通过后的类型化投影,提交网关的请求单元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUser {
    pub name: String,     // 用户名
    pub email: String,    // 邮箱(批内唯一键)
    pub password: String, // 初始密码(明文透传给网关,由服务端哈希)
}

// ==========================================
// ImportedUser - 网关回显的已落库用户
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedUser {
    #[serde(default)]
    pub id: Option<i64>, // 服务端分配的用户 ID
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>, // 注册时间(服务端格式原样保留)
}

// ==========================================
// RowDiagnostic - 行级诊断
// ==========================================
// 用途: 一条行内校验错误,1-based 行号对应文件内数据行顺序
// 红线: 创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row_number: usize, // 数据行号(1-based,跳过的空行不占号)
    pub field: String,     // 出错字段
    pub message: String,   // 问题描述(不含行号前缀)
}

impl RowDiagnostic {
    pub fn new(row_number: usize, field: &str, message: String) -> Self {
        Self {
            row_number,
            field: field.to_string(),
            message,
        }
    }
}

// 呈现约定: `Row <行号>: <问题描述>`
impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row_number, self.message)
    }
}

// ==========================================
// ValidationOutcome - 单行校验结果
// ==========================================
// 恰好二择一: 接受(产出候选记录)或拒绝(1~3条诊断)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(CandidateUser),
    Rejected(Vec<RowDiagnostic>),
}

// ==========================================
// BatchResult - 批次校验结果
// ==========================================
// 不变式: diagnostics 非空时 valid_users 禁止提交(全有或全无闸门)
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub valid_users: Vec<CandidateUser>,  // 通过校验的记录(按行序)
    pub diagnostics: Vec<RowDiagnostic>,  // 全部诊断(按行序)
}

impl BatchResult {
    /// 闸门判定: 只有零诊断的批次才允许提交
    pub fn submission_allowed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按呈现约定渲染全部诊断消息(保持行序)
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    /// 被拒绝的行数(同一行多条诊断只计一次)
    pub fn rejected_row_count(&self) -> usize {
        self.diagnostics
            .iter()
            .map(|d| d.row_number)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

// ==========================================
// ImportOutcome - 导入终态
// ==========================================
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// 网关接受,回显已落库用户
    Submitted { users: Vec<ImportedUser> },
    /// 校验诊断非空,整批被闸门拦截,网关未被调用
    ValidationBlocked,
    /// 文件无数据行,无可提交内容,网关未被调用
    EmptyBatch,
    /// 校验通过但网关按记录拒绝(如服务端唯一约束)
    GatewayRejected,
}

// ==========================================
// ImportReport - 导入批次报告
// ==========================================
// 用途: 单次导入调用的完整结果(统计 + 消息 + 终态)
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub batch_id: String,           // 批次 ID(UUID)
    pub file_name: Option<String>,  // 源文件名
    pub total_rows: usize,          // 数据行总数(不含表头与空行)
    pub accepted_rows: usize,       // 通过行内校验的行数
    pub rejected_rows: usize,       // 至少一条诊断的行数
    pub messages: Vec<String>,      // 呈现给调用方的消息(行序)
    pub outcome: ImportOutcome,     // 终态
    pub imported_at: DateTime<Utc>, // 导入时间
    pub elapsed_ms: u64,            // 导入耗时(毫秒)
}
