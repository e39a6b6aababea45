// ==========================================
// 用户批量导入引擎 - 导入 Trait
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 导入管道接口
// 职责: 定义导入接口(不包含实现)
// ==========================================

use crate::domain::user::{ImportReport, RawRow};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// UserImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: UserImporterImpl
#[async_trait]
pub trait UserImporter: Send + Sync {
    /// 从文件导入用户数据(格式由扩展名判定)
    ///
    /// # 参数
    /// - file_path: 源文件路径(.csv / .xlsx)
    ///
    /// # 返回
    /// - Ok(ImportReport): 批次报告(统计 + 消息 + 终态)
    /// - Err(ImportError): 致命错误(格式不支持、解析失败、
    ///   网关传输失败),零行被提交
    ///
    /// # 流程
    /// 1. 格式判定与文件解析 → Vec<RawRow>
    /// 2. 逐行校验(必填/格式/批内去重,顺序敏感)
    /// 3. 批次汇总与闸门判定
    /// 4. 仅当零诊断时调用提交网关(一次,整批)
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口(阶段 0)
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为有序原始行记录(列名 → 值)
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}
