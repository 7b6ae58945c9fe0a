// ============================================================================
// Locsmith - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 启动 CLI 并把致命错误转换为退出状态
//
// ============================================================================

use locsmith::utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(err) = locsmith::cli::run_cli().await {
        Logger::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
