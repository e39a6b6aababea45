// ==========================================
// 用户批量导入引擎 - 文件解析器实现
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md - 阶段 0: 文件读取与解析
// 支持: CSV (.csv) / Excel (.xlsx)
// ==========================================
// 契约: 首个数据行之前的表头行提供键集,之后每行映射为
//       RawRow(列名 → TRIM 后的单元格值)。缺失的尾部列视为
//       字段缺失而非解析错误(必填校验推迟到行校验阶段)。
//       全空行跳过,不占行号。
// ==========================================

use crate::domain::user::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::user_importer_trait::FileParser;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// FileFormat - 文件格式判定
// ==========================================
// 规则: 取最后一个 `.` 之后的扩展名,不区分大小写
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// 根据文件名判定格式,不支持的扩展名直接终止导入
    pub fn detect(path: &Path) -> ImportResult<FileFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致(尾列缺失)
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::CsvParseError(
                "no header row found".to_string(),
            ));
        }

        // 读取数据行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 说明: 仅读取第一个工作表;单元格先转为自然类型再字符串化
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 表头 = 第一行
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("sheet has no header row".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::ExcelParseError(
                "no header row found".to_string(),
            ));
        }

        // 数据行
        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let mut row = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器(根据扩展名自动选择)
// ==========================================
// 格式判定只在此处发生一次,调用方不做格式分支
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        match FileFormat::detect(file_path)? {
            FileFormat::Csv => CsvParser.parse_to_raw_rows(file_path),
            FileFormat::Xlsx => ExcelParser.parse_to_raw_rows(file_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_detect_format_case_insensitive() {
        assert_eq!(
            FileFormat::detect(Path::new("users.CSV")).unwrap(),
            FileFormat::Csv
        );
        assert_eq!(
            FileFormat::detect(Path::new("users.Xlsx")).unwrap(),
            FileFormat::Xlsx
        );
    }

    #[test]
    fn test_detect_format_unsupported() {
        let err = FileFormat::detect(Path::new("users.txt")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            "name,email,password",
            "Ann,a@x.com,p1",
            "Bob,b@x.com,p2",
        ]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some(&"Ann".to_string()));
        assert_eq!(rows[1].get("email"), Some(&"b@x.com".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skips_empty_rows() {
        let temp_file = csv_file(&[
            "name,email,password",
            "Ann,a@x.com,p1",
            ",,", // 空行
            "Bob,b@x.com,p2",
        ]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        // 空行被跳过,不占行号
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(&"Bob".to_string()));
    }

    #[test]
    fn test_csv_parser_tolerates_missing_trailing_columns() {
        let temp_file = csv_file(&["name,email,password", "Ann,a@x.com"]);

        let rows = CsvParser.parse_to_raw_rows(temp_file.path()).unwrap();

        // 缺失尾列在解析阶段不是错误,password 键直接缺席
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("password"), None);
    }

    #[test]
    fn test_csv_parser_empty_file_is_parse_failure() {
        let temp_file = csv_file(&[]);

        let result = CsvParser.parse_to_raw_rows(temp_file.path());
        assert!(matches!(result, Err(ImportError::CsvParseError(_))));
    }

    #[test]
    fn test_excel_parser_rejects_non_xlsx_content() {
        let mut temp_file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        temp_file.write_all(b"this is not a spreadsheet").unwrap();

        let result = ExcelParser.parse_to_raw_rows(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_universal_parser_routes_by_extension() {
        let temp_file = csv_file(&["name,email,password", "Ann,a@x.com,p1"]);

        let rows = UniversalFileParser
            .parse_to_raw_rows(temp_file.path())
            .unwrap();
        assert_eq!(rows.len(), 1);

        let result = UniversalFileParser.parse_to_raw_rows(Path::new("users.json"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
