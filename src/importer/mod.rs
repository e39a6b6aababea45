// ==========================================
// 用户批量导入引擎 - 导入层
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 1. 导入主流程
// ==========================================
// 职责: 文件 → 有序原始行 → 行内校验 → 批次闸门
// 支持: CSV, Excel (.xlsx)
// ==========================================

// 模块声明
pub mod batch_reconciler;
pub mod error;
pub mod file_parser;
pub mod row_validator;
pub mod user_importer_impl;
pub mod user_importer_trait;

// 重导出核心类型
pub use batch_reconciler::BatchReconciler;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileFormat, UniversalFileParser};
pub use row_validator::{RowValidator, SeenEmails};
pub use user_importer_impl::UserImporterImpl;

// 重导出 Trait 接口
pub use user_importer_trait::{FileParser, UserImporter};
