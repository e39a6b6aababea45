// ==========================================
// 用户批量导入引擎 - 行校验器实现
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 阶段 1: 行内校验规则
// ==========================================
// 校验顺序: 必填 → 邮箱格式 → 批内重复,前一类失败即停止
// 红线: SeenEmails 由调用方显式持有并逐行传入,
//       禁止任何全局/静态可变状态
// ==========================================

use crate::domain::user::{CandidateUser, RawRow, RowDiagnostic, ValidationOutcome};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// ==========================================
// SeenEmails - 批内已接受邮箱集合
// ==========================================
// 作用域: 单次批校验运行;逐行顺序传递,使重复检测
// 依赖行序(同批不可并行化)
pub type SeenEmails = HashSet<String>;

// 邮箱格式: 本地部分@域名,域名必须含 `.`(严格策略)
// 与服务端 bulk-import 接口的校验口径一致
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

// ==========================================
// RowValidator - 行校验器
// ==========================================
#[derive(Debug, Default)]
pub struct RowValidator;

impl RowValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验单行,返回恰好一个 ValidationOutcome
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 数据行号(1-based)
    /// - seen_emails: 批内已接受邮箱集合(跨行累积状态)
    ///
    /// # 规则
    /// 1. name/email/password 必填,缺失字段各产生一条诊断
    ///    (最多3条),任一缺失则本行到此为止
    /// 2. 邮箱格式不符 → 恰好一条诊断,停止
    /// 3. 邮箱已在 seen_emails 中(区分大小写的精确匹配)
    ///    → 恰好一条诊断,停止
    /// 4. 全部通过 → 邮箱计入 seen_emails,产出 CandidateUser
    pub fn validate_row(
        &self,
        row: &RawRow,
        row_number: usize,
        seen_emails: &mut SeenEmails,
    ) -> ValidationOutcome {
        let name = field_value(row, "name");
        let email = field_value(row, "email");
        let password = field_value(row, "password");

        // === 规则 1: 必填字段 ===
        let mut diagnostics = Vec::new();
        if name.is_none() {
            diagnostics.push(missing_field(row, row_number, "name", "Name is required"));
        }
        if email.is_none() {
            diagnostics.push(missing_field(row, row_number, "email", "Email is required"));
        }
        if password.is_none() {
            diagnostics.push(missing_field(
                row,
                row_number,
                "password",
                "Password is required",
            ));
        }

        let (Some(name), Some(email), Some(password)) = (name, email, password) else {
            return ValidationOutcome::Rejected(diagnostics);
        };

        // === 规则 2: 邮箱格式 ===
        if !EMAIL_RE.is_match(&email) {
            return ValidationOutcome::Rejected(vec![RowDiagnostic::new(
                row_number,
                "email",
                format!("Invalid email format: {}", email),
            )]);
        }

        // === 规则 3: 批内重复 ===
        if seen_emails.contains(&email) {
            return ValidationOutcome::Rejected(vec![RowDiagnostic::new(
                row_number,
                "email",
                format!("Duplicate email found: {}", email),
            )]);
        }

        // === 规则 4: 接受 ===
        seen_emails.insert(email.clone());
        ValidationOutcome::Accepted(CandidateUser {
            name,
            email,
            password,
        })
    }
}

// 取字段值: 缺失键与空白值一律视为缺失
fn field_value(row: &RawRow, field: &str) -> Option<String> {
    row.get(field)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// 必填字段诊断: 附带整行内容便于排查
fn missing_field(row: &RawRow, row_number: usize, field: &str, label: &str) -> RowDiagnostic {
    let content = serde_json::to_string(row).unwrap_or_else(|_| "{}".to_string());
    RowDiagnostic::new(
        row_number,
        field,
        format!("{} (Row content: {})", label, content),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, email: &str, password: &str) -> RawRow {
        let mut r = RawRow::new();
        r.insert("name".to_string(), name.to_string());
        r.insert("email".to_string(), email.to_string());
        r.insert("password".to_string(), password.to_string());
        r
    }

    #[test]
    fn test_valid_row_accepted() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        let outcome = validator.validate_row(&row("Ann", "a@x.com", "p1"), 1, &mut seen);

        assert_eq!(
            outcome,
            ValidationOutcome::Accepted(CandidateUser {
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
                password: "p1".to_string(),
            })
        );
        assert!(seen.contains("a@x.com"));
    }

    #[test]
    fn test_missing_fields_each_produce_a_diagnostic() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        let outcome = validator.validate_row(&row("", "", "p1"), 1, &mut seen);

        let ValidationOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].field, "name");
        assert!(diags[0].message.starts_with("Name is required"));
        assert!(diags[0].message.contains("Row content:"));
        assert_eq!(diags[1].field, "email");
    }

    #[test]
    fn test_missing_key_treated_as_missing_field() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        // 尾列缺失: password 键不存在
        let mut r = RawRow::new();
        r.insert("name".to_string(), "Ann".to_string());
        r.insert("email".to_string(), "a@x.com".to_string());

        let outcome = validator.validate_row(&r, 1, &mut seen);

        let ValidationOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].field, "password");
    }

    #[test]
    fn test_missing_field_skips_format_and_duplicate_checks() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        // 邮箱格式非法,但 name 缺失 → 只报必填,不报格式
        let outcome = validator.validate_row(&row("", "bad-email", "p1"), 1, &mut seen);

        let ValidationOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].field, "name");
        // 被拒绝行的邮箱不得计入去重集合
        assert!(seen.is_empty());
    }

    #[test]
    fn test_invalid_email_format_exactly_one_diagnostic() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        let outcome = validator.validate_row(&row("Bob", "bad-email", "p2"), 2, &mut seen);

        let ValidationOutcome::Rejected(diags) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].to_string(), "Row 2: Invalid email format: bad-email");
        assert!(seen.is_empty());
    }

    #[test]
    fn test_email_requires_domain_dot() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        // 严格策略: 域名无 `.` 视为非法
        let outcome = validator.validate_row(&row("Bob", "bob@localhost", "p2"), 1, &mut seen);
        assert!(matches!(outcome, ValidationOutcome::Rejected(_)));
    }

    #[test]
    fn test_duplicate_detection_is_order_sensitive() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        let first = validator.validate_row(&row("Ann", "a@x.com", "p1"), 1, &mut seen);
        let second = validator.validate_row(&row("Ann2", "a@x.com", "p2"), 2, &mut seen);

        assert!(matches!(first, ValidationOutcome::Accepted(_)));
        let ValidationOutcome::Rejected(diags) = second else {
            panic!("expected rejection");
        };
        assert_eq!(diags[0].to_string(), "Row 2: Duplicate email found: a@x.com");
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let validator = RowValidator::new();
        let mut seen = SeenEmails::new();

        let first = validator.validate_row(&row("Ann", "a@x.com", "p1"), 1, &mut seen);
        // 大小写不同 → 按原样比较,不算重复
        let second = validator.validate_row(&row("Ann2", "A@x.com", "p2"), 2, &mut seen);

        assert!(matches!(first, ValidationOutcome::Accepted(_)));
        assert!(matches!(second, ValidationOutcome::Accepted(_)));
    }
}
