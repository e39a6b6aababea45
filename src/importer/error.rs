// ==========================================
// 用户批量导入引擎 - 导入模块错误类型
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 7. 错误分类
// 工具: thiserror 派生宏
// ==========================================

use crate::gateway::GatewayError;
use thiserror::Error;

/// 导入模块错误类型
///
/// 文件/格式类错误对整次导入是致命的: 零行被处理,
/// 直接向调用方返回单条消息。行内校验失败不走此类型,
/// 而是作为 RowDiagnostic 收集后由批次闸门处理。
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (only .csv/.xlsx)")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Failed to parse CSV file: {0}")]
    CsvParseError(String),

    #[error("Failed to parse Excel file: {0}")]
    ExcelParseError(String),

    // ===== 网关错误 =====
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
