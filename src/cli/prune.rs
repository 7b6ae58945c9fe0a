// ============================================================================
// Locsmith - CLI Prune 命令
// ============================================================================
//
// 文件: src/cli/prune.rs
// 职责: 从规范目录删除生成键
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用目录清理并输出结果
//   - ❌ 不应修改标记文件
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;

use crate::core::catalog;
use crate::core::keygen::KeyGenerator;
use crate::models::config::Config;
use crate::models::report::PruneReport;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 清理生成键
#[derive(Debug, Args)]
pub struct PruneArgs {
    /// 只报告将删除的键数
    #[arg(long)]
    pub dry_run: bool,
}

pub fn handle_prune(args: PruneArgs, config: &Config) -> Result<()> {
    Logger::info(t!("prune.start"));

    let catalog_path = config.catalog_path();
    let generator = KeyGenerator::new(&config.extract.key_prefix, config.extract.key_hash_length);

    let (removed, remaining) = catalog::prune_and_save(&catalog_path, &generator, args.dry_run)
        .with_context(|| tf!("prune.failed", catalog_path.display()))?;

    summary::render_prune(&PruneReport {
        removed,
        remaining,
        dry_run: args.dry_run,
    });
    Ok(())
}
