// ==========================================
// 用户批量导入引擎 - CLI 主入口
// ==========================================
// 用法: bulk-user-import <file.csv|file.xlsx>
// 环境: BULK_IMPORT_GATEWAY_URL 覆写网关端点
// ==========================================

use bulk_user_import::config::GatewayConfig;
use bulk_user_import::gateway::HttpSubmissionGateway;
use bulk_user_import::importer::{UserImporter, UserImporterImpl};
use bulk_user_import::{logging, ImportOutcome};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", bulk_user_import::APP_NAME);
    tracing::info!("系统版本: {}", bulk_user_import::VERSION);
    tracing::info!("==================================================");

    let Some(file_path) = std::env::args().nth(1) else {
        eprintln!("Usage: bulk-user-import <file.csv|file.xlsx>");
        return ExitCode::from(2);
    };

    let config = GatewayConfig::from_env();
    tracing::info!("网关端点: {}", config.endpoint);

    let gateway = HttpSubmissionGateway::new(&config);
    let importer = UserImporterImpl::new(gateway);

    match importer.import_from_file(&file_path).await {
        Ok(report) => {
            for message in &report.messages {
                println!("{}", message);
            }
            match report.outcome {
                ImportOutcome::Submitted { ref users } => {
                    println!(
                        "Users imported successfully ({} of {} rows, batch {})",
                        users.len(),
                        report.total_rows,
                        report.batch_id
                    );
                    ExitCode::SUCCESS
                }
                ImportOutcome::EmptyBatch => {
                    println!("No data rows found; nothing was imported");
                    ExitCode::FAILURE
                }
                ImportOutcome::ValidationBlocked | ImportOutcome::GatewayRejected => {
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            tracing::error!("导入失败: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
