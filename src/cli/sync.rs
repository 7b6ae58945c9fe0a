// ============================================================================
// Locsmith - CLI Sync 命令
// ============================================================================
//
// 文件: src/cli/sync.rs
// 职责: 语言同步命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 翻译后端连接检查（失败即退出）
//   - ✅ 结果输出（表格/JSON）
//   - ❌ 不应包含差异/合并逻辑
//   - ❌ 不应包含 HTTP 请求细节
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use super::OutputFormat;
use crate::core::synchronizer::{SyncOptions, Synchronizer};
use crate::core::translator::HttpTranslator;
use crate::models::config::Config;
use crate::ui::{progress, summary};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 同步目标语言目录
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// 只报告每种语言缺失的键，不调用翻译后端
    #[arg(long)]
    pub dry_run: bool,

    /// 输出格式 (table, json)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub async fn handle_sync(args: SyncArgs, config: &Config) -> Result<()> {
    Logger::info(t!("sync.start"));

    let options = SyncOptions::from_config(config, args.dry_run);
    let source_path = options.source_path();
    if !source_path.exists() {
        Logger::warn(tf!("sync.missing_source", source_path.display()));
    }

    let synchronizer = Synchronizer::new(options);
    let show_spinner = config.output.show_progress && args.format == OutputFormat::Table;

    let report = if args.dry_run {
        synchronizer.plan().await
    } else {
        Logger::info(tf!("sync.connecting", config.translator.endpoint));
        // 后端不可用属于启动失败，直接返回错误
        let translator =
            HttpTranslator::connect(config.translator.clone(), &config.sync.source_language).await?;

        let spinner = progress::spinner(&t!("sync.translating"), show_spinner);
        let report = synchronizer.run(&translator).await;
        spinner.finish_and_clear();
        report
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => summary::render_sync(&report),
    }
    Ok(())
}
