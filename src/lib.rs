// ==========================================
// 代码编辑平台 - 用户批量导入引擎
// ==========================================
// 依据: Bulk_Import_Spec_v0.2.md
// 技术栈: Rust + tokio + csv/calamine + reqwest
// 定位: 管理后台批量建号的客户端校验管道
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与结果类型
pub mod domain;

// 导入层 - 解析/校验/闸门
pub mod importer;

// 网关层 - 账户创建服务契约与 HTTP 实现
pub mod gateway;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BatchResult, CandidateUser, ImportOutcome, ImportReport, ImportedUser, RawRow, RowDiagnostic,
    ValidationOutcome,
};

// 导入层
pub use importer::{
    BatchReconciler, CsvParser, ExcelParser, FileFormat, FileParser, ImportError, RowValidator,
    SeenEmails, UniversalFileParser, UserImporter, UserImporterImpl,
};

// 网关层
pub use gateway::{GatewayError, HttpSubmissionGateway, SubmissionGateway, SubmissionReport};

// 配置
pub use config::GatewayConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "用户批量导入引擎";
