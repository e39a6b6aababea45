// ==========================================
// 用户批量导入引擎 - 导入器实现
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 1. 导入主流程
// ==========================================
// 流程: 解析 → 逐行校验 → 批次汇总 → 闸门 → 提交
// 红线: 诊断非空的批次绝不触达提交网关(全有或全无);
//       解析与校验同步完成,唯一异步挂起点是网关调用
// ==========================================

use crate::domain::user::{ImportOutcome, ImportReport};
use crate::gateway::{SubmissionGateway, SubmissionReport};
use crate::importer::batch_reconciler::BatchReconciler;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::row_validator::{RowValidator, SeenEmails};
use crate::importer::user_importer_trait::{FileParser, UserImporter};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// UserImporterImpl - 批量导入器
// ==========================================
pub struct UserImporterImpl<G>
where
    G: SubmissionGateway,
{
    gateway: G,
    file_parser: Box<dyn FileParser>,
}

impl<G> UserImporterImpl<G>
where
    G: SubmissionGateway,
{
    /// 创建导入器,文件解析按扩展名自动路由
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            file_parser: Box::new(UniversalFileParser),
        }
    }
}

#[async_trait::async_trait]
impl<G> UserImporter for UserImporterImpl<G>
where
    G: SubmissionGateway,
{
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport> {
        let started = Instant::now();
        let path = file_path.as_ref();
        let batch_id = Uuid::new_v4().to_string();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        info!(
            batch_id = %batch_id,
            file = file_name.as_deref().unwrap_or("<unknown>"),
            "starting user import"
        );

        // === 阶段 0-1: 格式判定与解析 ===
        let rows = self.file_parser.parse_to_raw_rows(path)?;
        let total_rows = rows.len();

        // === 阶段 2: 逐行校验(行序敏感,SeenEmails 顺序传递) ===
        let validator = RowValidator::new();
        let mut seen_emails = SeenEmails::new();
        let mut reconciler = BatchReconciler::new();
        for (idx, row) in rows.iter().enumerate() {
            reconciler.record(validator.validate_row(row, idx + 1, &mut seen_emails));
        }
        let batch = reconciler.finalize();

        let mut report = ImportReport {
            batch_id,
            file_name,
            total_rows,
            accepted_rows: batch.valid_users.len(),
            rejected_rows: batch.rejected_row_count(),
            messages: Vec::new(),
            outcome: ImportOutcome::ValidationBlocked,
            imported_at: Utc::now(),
            elapsed_ms: 0,
        };

        // === 阶段 3: 闸门判定 ===
        if !batch.submission_allowed() {
            warn!(
                batch_id = %report.batch_id,
                rejected_rows = report.rejected_rows,
                "batch blocked by validation diagnostics"
            );
            report.messages = batch.messages();
            report.elapsed_ms = started.elapsed().as_millis() as u64;
            return Ok(report);
        }

        if batch.valid_users.is_empty() {
            warn!(batch_id = %report.batch_id, "file contains no data rows; nothing to submit");
            report.outcome = ImportOutcome::EmptyBatch;
            report.elapsed_ms = started.elapsed().as_millis() as u64;
            return Ok(report);
        }

        // === 阶段 4: 整批提交(一次调用,不重试不拆分) ===
        match self.gateway.submit_users(&batch.valid_users).await? {
            SubmissionReport::Accepted { users } => {
                info!(
                    batch_id = %report.batch_id,
                    imported = users.len(),
                    "batch submitted successfully"
                );
                report.outcome = ImportOutcome::Submitted { users };
            }
            SubmissionReport::Rejected { errors } => {
                warn!(
                    batch_id = %report.batch_id,
                    records = errors.len(),
                    "gateway rejected the batch"
                );
                report.messages = render_gateway_errors(&errors);
                report.outcome = ImportOutcome::GatewayRejected;
            }
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }
}

/// 网关拒绝报告 → 调用方消息
///
/// 每条被拒记录的每个字段各一条消息,按记录在提交批次中的
/// 位置(1-based)标注,与行内诊断同一呈现约定
pub fn render_gateway_errors(errors: &[BTreeMap<String, String>]) -> Vec<String> {
    let mut messages = Vec::new();
    for (idx, record_errors) in errors.iter().enumerate() {
        for message in record_errors.values() {
            messages.push(format!("Row {}: {}", idx + 1, message));
        }
    }
    messages
}
