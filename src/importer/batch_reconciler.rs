// ==========================================
// 用户批量导入引擎 - 批次汇总器实现
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 阶段 2: 批次汇总与闸门
// ==========================================
// 策略: 先收集全部诊断再判闸门(一次性给出完整错误报告),
//       而非首错即停 — 这是调用方 UX 契约的一部分
// ==========================================

use crate::domain::user::{BatchResult, ValidationOutcome};

// ==========================================
// BatchReconciler - 批次汇总器
// ==========================================
// 按行序把每行的 ValidationOutcome 归并为两个互斥序列:
// 通过记录与诊断。闸门判定由 BatchResult 提供。
#[derive(Debug, Default)]
pub struct BatchReconciler {
    result: BatchResult,
}

impl BatchReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 归并一行的校验结果(必须按行序调用)
    pub fn record(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Accepted(user) => self.result.valid_users.push(user),
            ValidationOutcome::Rejected(diagnostics) => {
                self.result.diagnostics.extend(diagnostics)
            }
        }
    }

    /// 所有行处理完毕后定格批次结果
    pub fn finalize(self) -> BatchResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{CandidateUser, RowDiagnostic};

    fn user(n: usize) -> CandidateUser {
        CandidateUser {
            name: format!("User{}", n),
            email: format!("u{}@x.com", n),
            password: "p".to_string(),
        }
    }

    #[test]
    fn test_clean_batch_allows_submission() {
        let mut reconciler = BatchReconciler::new();
        reconciler.record(ValidationOutcome::Accepted(user(1)));
        reconciler.record(ValidationOutcome::Accepted(user(2)));

        let batch = reconciler.finalize();

        assert!(batch.submission_allowed());
        assert_eq!(batch.valid_users.len(), 2);
        assert!(batch.diagnostics.is_empty());
    }

    #[test]
    fn test_any_diagnostic_blocks_the_whole_batch() {
        let mut reconciler = BatchReconciler::new();
        reconciler.record(ValidationOutcome::Accepted(user(1)));
        reconciler.record(ValidationOutcome::Rejected(vec![RowDiagnostic::new(
            2,
            "email",
            "Invalid email format: bad-email".to_string(),
        )]));

        let batch = reconciler.finalize();

        // 即使存在通过的记录,闸门也拦截整批
        assert!(!batch.submission_allowed());
        assert_eq!(batch.valid_users.len(), 1);
        assert_eq!(batch.rejected_row_count(), 1);
    }

    #[test]
    fn test_diagnostics_preserve_row_order() {
        let mut reconciler = BatchReconciler::new();
        reconciler.record(ValidationOutcome::Rejected(vec![
            RowDiagnostic::new(1, "name", "Name is required".to_string()),
            RowDiagnostic::new(1, "email", "Email is required".to_string()),
        ]));
        reconciler.record(ValidationOutcome::Rejected(vec![RowDiagnostic::new(
            2,
            "password",
            "Password is required".to_string(),
        )]));

        let batch = reconciler.finalize();

        let messages = batch.messages();
        assert_eq!(
            messages,
            vec![
                "Row 1: Name is required",
                "Row 1: Email is required",
                "Row 2: Password is required",
            ]
        );
    }
}
